use bevy::prelude::*;

use super::*;
use crate::plugins::core::RejectedInput;

fn frame(w: u32) -> AssetNode {
    AssetNode::Frame(Frame::solid(Color::WHITE, Mask::filled(w, 8)))
}

/// Strip whose frame widths encode their numeric key, so ordering is observable.
fn strip(keys: &[&str]) -> AssetNode {
    AssetNode::dir(keys.iter().map(|k| (*k, frame(k.parse::<u32>().unwrap() + 1))))
}

fn full_tree() -> AssetNode {
    AssetNode::dir([
        (
            "player",
            AssetNode::dir(["left", "right", "up", "down"].map(|f| (f, strip(&["0", "1", "2", "3"])))),
        ),
        (
            "enemies",
            AssetNode::dir([
                ("bat", strip(&["0", "1"])),
                ("blob", strip(&["0"])),
                ("skeleton", strip(&["0", "1", "2"])),
            ]),
        ),
        ("gun", AssetNode::dir([("gun", frame(40)), ("bullet", frame(12))])),
    ])
}

#[test]
fn resolves_full_tree() {
    let catalog = FrameCatalog::from_tree(&full_tree()).unwrap();

    assert_eq!(catalog.strip(ArtKey::Character(Facing::Left)).len(), 4);
    assert_eq!(catalog.strip(ArtKey::Enemy(EnemyKind::Skeleton)).len(), 3);
    assert_eq!(catalog.strip(ArtKey::Gun)[0].size().x, 40.0);
    assert_eq!(catalog.strip(ArtKey::Bullet)[0].size().x, 12.0);
}

#[test]
fn integer_keys_are_ordered_numerically_not_lexically() {
    let mut tree = full_tree();
    let AssetNode::Dir(root) = &mut tree else { unreachable!() };
    let AssetNode::Dir(enemies) = root.get_mut("enemies").unwrap() else { unreachable!() };
    enemies.insert("bat".into(), strip(&["10", "2", "1"]));

    let catalog = FrameCatalog::from_tree(&tree).unwrap();
    let widths: Vec<f32> = catalog
        .strip(ArtKey::Enemy(EnemyKind::Bat))
        .iter()
        .map(|f| f.size().x)
        .collect();
    assert_eq!(widths, vec![2.0, 3.0, 11.0]);
}

#[test]
fn frame_index_wraps_and_silhouette_uses_first_down_frame() {
    let catalog = FrameCatalog::from_tree(&full_tree()).unwrap();

    let wrapped = catalog.frame(ArtKey::Enemy(EnemyKind::Bat), 3);
    assert_eq!(wrapped, &catalog.strip(ArtKey::Enemy(EnemyKind::Bat))[1]);

    let sil = catalog.silhouette(ArtKey::Character(Facing::Up));
    assert_eq!(sil, &catalog.strip(ArtKey::Character(Facing::Down))[0]);
}

#[test]
fn missing_facing_is_reported_with_its_path() {
    let tree = AssetNode::dir([
        ("player", AssetNode::dir([("left", strip(&["0"]))])),
        ("enemies", AssetNode::dir::<[(&str, AssetNode); 0], &str>([])),
        ("gun", AssetNode::dir([("gun", frame(4)), ("bullet", frame(4))])),
    ]);

    let err = FrameCatalog::from_tree(&tree).unwrap_err();
    assert_eq!(err, CatalogError::Missing("player/right".into()));
}

#[test]
fn non_integer_frame_key_is_rejected() {
    let mut tree = full_tree();
    let AssetNode::Dir(root) = &mut tree else { unreachable!() };
    let AssetNode::Dir(enemies) = root.get_mut("enemies").unwrap() else { unreachable!() };
    enemies.insert("blob".into(), AssetNode::dir([("first", frame(3))]));

    let err = FrameCatalog::from_tree(&tree).unwrap_err();
    assert_eq!(
        err,
        CatalogError::BadFrameKey { path: "enemies/blob".into(), key: "first".into() }
    );
}

#[test]
fn empty_strip_is_rejected() {
    let mut tree = full_tree();
    let AssetNode::Dir(root) = &mut tree else { unreachable!() };
    let AssetNode::Dir(enemies) = root.get_mut("enemies").unwrap() else { unreachable!() };
    enemies.insert("skeleton".into(), AssetNode::Dir(Default::default()));

    let err = FrameCatalog::from_tree(&tree).unwrap_err();
    assert_eq!(err, CatalogError::EmptyStrip("enemies/skeleton".into()));
    assert_eq!(err.to_string(), "catalog entry `enemies/skeleton` has no frames");
}

#[test]
fn placeholder_is_complete() {
    let catalog = FrameCatalog::placeholder();
    for facing in Facing::ALL {
        assert!(!catalog.strip(ArtKey::Character(facing)).is_empty());
    }
    for kind in EnemyKind::ALL {
        assert!(!catalog.strip(ArtKey::Enemy(kind)).is_empty());
    }
}

#[test]
fn plugin_keeps_a_supplied_catalog() {
    let mut app = App::new();
    let supplied = FrameCatalog::from_tree(&full_tree()).unwrap();
    app.insert_resource(supplied);
    plugin(&mut app);

    let catalog = app.world().resource::<FrameCatalog>();
    assert_eq!(catalog.strip(ArtKey::Gun)[0].size().x, 40.0);
}

#[test]
fn plugin_resolves_a_supplied_tree() {
    let mut app = App::new();
    app.insert_resource(AssetTree(full_tree()));
    plugin(&mut app);

    assert!(!app.world().contains_resource::<AssetTree>());
    assert!(!app.world().contains_resource::<RejectedInput>());
    let catalog = app.world().resource::<FrameCatalog>();
    assert_eq!(catalog.strip(ArtKey::Enemy(EnemyKind::Bat)).len(), 2);
}

#[test]
fn plugin_rejects_an_incomplete_tree() {
    let mut tree = full_tree();
    let AssetNode::Dir(root) = &mut tree else { unreachable!() };
    root.remove("gun");

    let mut app = App::new();
    app.insert_resource(AssetTree(tree));
    plugin(&mut app);

    assert_eq!(
        app.world().resource::<RejectedInput>().0,
        vec!["asset tree: missing catalog entry `gun`".to_owned()]
    );
    assert!(app.world().contains_resource::<FrameCatalog>());
}
