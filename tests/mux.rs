use treemux::{Mux, MuxError};

fn build() -> Mux<usize> {
    let mut mux: Mux<usize> = Mux::with_value(1);
    mux.add("a", 2).add("b", 3).add("c", 4);
    mux.add("b", 5).add("{id}", 6);
    mux.add("//c////d", 2);

    let mut sub: Mux<usize> = Mux::with_value(10);
    sub.add("z", 11);
    sub.add("x", 12);
    mux.graft("g", sub);

    mux.add("z/{idz}/y/{idy}/x/{idx}", 13);
    mux
}

#[test]
fn mux_common() {
    let mux = build();

    let cases: &[(&str, usize, &[(&str, &str)])] = &[
        ("", 1, &[]),
        ("/", 1, &[]),
        ("a", 2, &[]),
        ("/a", 2, &[]),
        ("//a", 2, &[]),
        ("//a/", 2, &[]),
        ("a/", 2, &[]),
        ("/a/b", 3, &[]),
        ("/a/b/c", 4, &[]),
        ("/b", 5, &[]),
        ("b/1", 6, &[("id", "1")]),
        ("/b/2", 6, &[("id", "2")]),
        ("b/2/", 6, &[("id", "2")]),
        ("/b/3", 6, &[("id", "3")]),
        ("/c/d", 2, &[]),
        ("/g", 10, &[]),
        ("/g/z", 11, &[]),
        ("/g/x", 12, &[]),
        (
            "/z/9/y/8/x/7",
            13,
            &[("idz", "9"), ("idy", "8"), ("idx", "7")],
        ),
    ];

    for &(path, data, captures) in cases {
        let (value, caps) = mux
            .find(path)
            .unwrap_or_else(|| panic!("{:?} -> not found", path));
        assert_eq!(*value, data, "{:?}", path);
        assert_eq!(&*caps, captures, "{:?}", path);
    }
}

#[test]
fn mux_route_segments() {
    let mut mux: Mux<usize> = Mux::new();
    mux.add("a", 2);
    mux.add("a/b", 3);
    mux.add("a/b/c", 4);
    mux.add("b", 5);
    mux.add("b/{id}", 6);

    let (node, caps) = mux.route(&["a"]).unwrap();
    assert_eq!(node.value(), Some(&2));
    assert!(caps.is_empty());

    let (node, caps) = mux.route(&["a", "b", "c"]).unwrap();
    assert_eq!(node.value(), Some(&4));
    assert!(caps.is_empty());

    let (node, caps) = mux.route(&["b", "42"]).unwrap();
    assert_eq!(node.value(), Some(&6));
    assert_eq!(caps.get("id"), Some("42"));
    assert_eq!(caps.parse::<u32>("id"), Some(Ok(42)));

    let (node, caps) = mux.route(&["b"]).unwrap();
    assert_eq!(node.value(), Some(&5));
    assert!(caps.is_empty());

    assert!(mux.route(&["x"]).is_none());

    // leading empty and "." segments are skipped at every level
    let (node, _) = mux.route(&["", ".", "a", "", "b"]).unwrap();
    assert_eq!(node.value(), Some(&3));
}

#[test]
fn mux_variable_binds_raw_segment() {
    let mut mux: Mux<usize> = Mux::new();
    mux.add("file/{name}", 1);

    let (value, caps) = mux.find("/file/a%20b.txt").unwrap();
    assert_eq!(*value, 1);
    assert_eq!(caps.get("name"), Some("a%20b.txt"));

    // a variable level never falls back to literal lookup
    let (_, caps) = mux.route(&["file", "{name}"]).unwrap();
    assert_eq!(caps.get("name"), Some("{name}"));
}

#[test]
fn mux_collision() {
    let mut mux: Mux<usize> = Mux::new();
    assert!(mux.try_add("/b/literal", 1).is_ok());
    assert_eq!(
        mux.try_add("/b/{id}", 2).unwrap_err(),
        MuxError::VariableConflict {
            path: "/b".into(),
            name: "id".into()
        }
    );

    let mut mux: Mux<usize> = Mux::new();
    assert!(mux.try_add("/b/{id}", 1).is_ok());
    assert_eq!(
        mux.try_add("/b/literal", 2).unwrap_err(),
        MuxError::ExpectVariable {
            path: "/b".into(),
            segment: "literal".into(),
            variable: "id".into()
        }
    );
    assert!(matches!(
        mux.try_add("/b/{other}", 2),
        Err(MuxError::ExpectVariable { .. })
    ));
    // not even the same variable is accepted twice at one level
    assert_eq!(
        mux.try_add("/b/{id}/detail", 3).unwrap_err(),
        MuxError::ExpectVariable {
            path: "/b".into(),
            segment: "{id}".into(),
            variable: "id".into()
        }
    );

    let mut mux: Mux<usize> = Mux::new();
    assert!(mux.try_add("/u/v/p", 1).is_ok());
    assert_eq!(
        mux.try_add("u//v/p/", 2).unwrap_err(),
        MuxError::Duplicate {
            path: "/u/v/p".into()
        }
    );

    let mut mux: Mux<usize> = Mux::new();
    assert!(matches!(
        mux.try_add("/a/1b", 1),
        Err(MuxError::InvalidName { .. })
    ));
    assert!(matches!(
        mux.try_add("/a/{}", 1),
        Err(MuxError::InvalidName { .. })
    ));
    assert!(matches!(
        mux.try_add("/a/b_", 1),
        Err(MuxError::InvalidName { .. })
    ));
    assert!(mux.is_empty());
}

#[test]
#[should_panic(expected = "duplicate value")]
fn mux_duplicate_panics() {
    let mut mux: Mux<usize> = Mux::new();
    mux.add("x/y", 1);
    mux.add("/x/y/", 2);
}

#[test]
#[should_panic(expected = "expects variable")]
fn mux_variable_sibling_panics() {
    let mut mux: Mux<usize> = Mux::new();
    mux.add("b/{id}", 1);
    mux.add("b/literal", 2);
}

#[test]
fn mux_empty_does_not_override() {
    let mut mux: Mux<usize> = Mux::new();
    mux.add("a/b", 1);
    mux.add_empty("a/b");
    mux.add_empty("a/c/d");
    assert_eq!(mux.find("/a/b").map(|(v, _)| *v), Some(1));
    assert!(mux.find("/a/c").is_none());
    assert!(mux.route(&["a", "c", "d"]).is_some());

    mux.add("a", 2);
    assert_eq!(mux.find("/a").map(|(v, _)| *v), Some(2));
}

#[test]
fn mux_graft() {
    let mut sub: Mux<usize> = Mux::new();
    sub.add("x", 12);
    sub.add("y", 11);

    let mut mux: Mux<usize> = Mux::new();
    mux.add("h", 1);
    mux.graft("g", sub);

    let (node, caps) = mux.route(&["g", "x"]).unwrap();
    assert_eq!(node.value(), Some(&12));
    assert!(caps.is_empty());
    assert_eq!(node.path("/"), "/g/x");
    assert_eq!(node.parent().unwrap().path("/"), "/g");
    assert!(mux.find("/g").is_none());
}

#[test]
fn mux_graft_conflict() {
    let mut mux: Mux<usize> = Mux::new();
    mux.add("g/a", 1);
    assert_eq!(
        mux.try_graft("g", Mux::new()).unwrap_err(),
        MuxError::GraftConflict { path: "/g".into() }
    );

    mux.add("h", 2);
    assert!(matches!(
        mux.try_graft("h", Mux::new()),
        Err(MuxError::GraftConflict { .. })
    ));
    assert!(matches!(
        mux.try_graft("h", Mux::with_value(3)),
        Err(MuxError::Duplicate { .. })
    ));
}

#[test]
fn mux_nested() {
    let mut mux: Mux<usize> = Mux::new();
    mux.nest("v1", |v1| {
        v1.nest("u/{uid}", |u| {
            u.add("p/{pid}", 1);
        });
    });

    let (value, caps) = mux.find("/v1/u/asd/p/qwe").unwrap();
    assert_eq!(*value, 1);
    assert_eq!(&*caps, &[("uid", "asd"), ("pid", "qwe")]);

    let (node, _) = mux.route(&["v1", "u", "asd", "p", "qwe"]).unwrap();
    assert_eq!(node.path("/"), "/v1/u/{uid}/p/{pid}");
}

#[test]
fn mux_path_format() {
    let mut mux: Mux<usize> = Mux::new();
    let id = mux.add("location/{id}/set/{field}", 1).id();

    let node = mux.node(id).unwrap();
    assert_eq!(node.path("/"), "/location/{id}/set/{field}");
    assert_eq!(node.path("."), ".location.{id}.set.{field}");
    assert_eq!(node.name(), "field");
    assert!(node.is_variable());
    assert_eq!(node.to_string(), "/location/{id}/set/{field}");

    let root = mux.root();
    assert_eq!(root.path("/"), "");
    assert_eq!(root.to_string(), "/");
    assert!(root.parent().is_none());
}

#[test]
fn mux_add_relative() {
    let mut mux: Mux<usize> = Mux::new();
    let b = mux.add_empty("a/b").id();
    mux.node_mut(b).unwrap().add("{id}", 1);

    let (value, caps) = mux.find("/a/b/7").unwrap();
    assert_eq!(*value, 1);
    assert_eq!(caps.get("id"), Some("7"));
}

#[test]
fn mux_extend_below_variable() {
    let mut mux: Mux<usize> = Mux::new();
    mux.add("b/{id}", 6).add("x", 7);
    assert!(mux.try_add("b/{id}/y", 8).is_err());

    let (value, caps) = mux.find("/b/42/x").unwrap();
    assert_eq!(*value, 7);
    assert_eq!(caps.get("id"), Some("42"));
    assert_eq!(mux.find("/b/42").map(|(v, _)| *v), Some(6));

    let mut mux: Mux<usize> = Mux::new();
    mux.nest("user/{uid}", |u| {
        u.add("post/{pid}", 1);
        u.add("profile", 2);
    });
    let (value, caps) = mux.find("/user/7/post/9").unwrap();
    assert_eq!(*value, 1);
    assert_eq!(&*caps, &[("uid", "7"), ("pid", "9")]);
    assert_eq!(mux.find("/user/7/profile").map(|(v, _)| *v), Some(2));
}

#[test]
fn mux_variable_bound_once() {
    let mut mux: Mux<usize> = Mux::new();
    assert_eq!(
        mux.try_add("a/{id}/b/{id}", 1).unwrap_err(),
        MuxError::DuplicateVariable {
            path: "/a/{id}/b/{id}".into(),
            name: "id".into()
        }
    );
    assert!(mux.is_empty());

    // relative to a node below a variable
    let id = mux.add("a/{id}", 1).id();
    assert_eq!(
        mux.node_mut(id)
            .unwrap()
            .try_add("b/{id}", 2)
            .map(|_| ())
            .unwrap_err(),
        MuxError::DuplicateVariable {
            path: "/a/{id}/b/{id}".into(),
            name: "id".into()
        }
    );
    assert!(mux.node_mut(id).unwrap().try_add("b/{other}", 2).is_ok());

    // a fragment reusing a name bound above the graft point
    let mut sub: Mux<usize> = Mux::new();
    sub.add("p/{uid}", 3);
    assert_eq!(
        mux.try_graft("u/{uid}", sub).map(|_| ()).unwrap_err(),
        MuxError::DuplicateVariable {
            path: "/u/{uid}/p/{uid}".into(),
            name: "uid".into()
        }
    );
    assert!(mux.find("/u/1").is_none());

    let (_, caps) = mux.find("/a/1/b/2").unwrap();
    assert_eq!(&*caps, &[("id", "1"), ("other", "2")]);
}

#[test]
#[should_panic(expected = "more than once")]
fn mux_variable_bound_once_panics() {
    let mut mux: Mux<usize> = Mux::new();
    mux.nest("v/{id}", |v| {
        v.add("w/{id}", 1);
    });
}
