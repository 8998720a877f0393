//! Frame catalog: every animation strip the simulation can show, keyed by a closed enum.
//!
//! The asset collaborator hands us a tree that mirrors its folders:
//!
//! ```text
//! player/{left,right,up,down}/{0,1,2,..}
//! enemies/{bat,blob,skeleton}/{0,1,2,..}
//! gun/gun
//! gun/bullet
//! ```
//!
//! `FrameCatalog::from_tree` resolves that tree once, when the plugin is built from a
//! supplied `AssetTree`. After that, lookups are plain array indexing by `ArtKey`; string
//! keys never reach the simulation. A rejected tree aborts the session.

use std::collections::BTreeMap;
use std::sync::Arc;

use bevy::prelude::*;
use thiserror::Error;

use crate::common::mask::Mask;
use crate::plugins::animation::Facing;
use crate::plugins::core::reject_input;
use crate::plugins::enemies::EnemyKind;

/// One drawable image plus the opaque-pixel footprint used for damage queries.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub image: Handle<Image>,
    pub tint: Color,
    pub mask: Arc<Mask>,
}

impl Frame {
    pub fn new(image: Handle<Image>, mask: Mask) -> Self {
        Self { image, tint: Color::WHITE, mask: Arc::new(mask) }
    }

    /// Asset-free frame: the default white texture tinted `color`.
    pub fn solid(color: Color, mask: Mask) -> Self {
        Self { image: Handle::default(), tint: color, mask: Arc::new(mask) }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.mask.size()
    }
}

/// Catalog lookup key: what is being drawn, and for directional art, which way it faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtKey {
    Character(Facing),
    Enemy(EnemyKind),
    Gun,
    Bullet,
}

/// Asset tree as delivered by the asset collaborator.
#[derive(Debug, Clone)]
pub enum AssetNode {
    Frame(Frame),
    Dir(BTreeMap<String, AssetNode>),
}

impl AssetNode {
    pub fn dir<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, AssetNode)>,
        K: Into<String>,
    {
        Self::Dir(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Raw asset tree, supplied before the catalog plugin is built.
#[derive(Resource, Debug, Clone)]
pub struct AssetTree(pub AssetNode);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("missing catalog entry `{0}`")]
    Missing(String),
    #[error("catalog entry `{0}` should be a folder")]
    NotAFolder(String),
    #[error("catalog entry `{0}` should be a single frame")]
    NotAFrame(String),
    #[error("frame key `{key}` under `{path}` is not an integer")]
    BadFrameKey { path: String, key: String },
    #[error("catalog entry `{0}` has no frames")]
    EmptyStrip(String),
}

#[derive(Resource, Debug, Clone)]
pub struct FrameCatalog {
    character: [Vec<Frame>; 4],
    enemies: [Vec<Frame>; 3],
    gun: Frame,
    bullet: Frame,
}

impl FrameCatalog {
    pub fn strip(&self, key: ArtKey) -> &[Frame] {
        match key {
            ArtKey::Character(facing) => &self.character[facing.index()],
            ArtKey::Enemy(kind) => &self.enemies[kind.index()],
            ArtKey::Gun => std::slice::from_ref(&self.gun),
            ArtKey::Bullet => std::slice::from_ref(&self.bullet),
        }
    }

    /// Frame `index` of a strip, wrapping around its length.
    pub fn frame(&self, key: ArtKey, index: usize) -> &Frame {
        let strip = self.strip(key);
        debug_assert!(!strip.is_empty(), "empty strip for {key:?}");
        &strip[index % strip.len()]
    }

    /// Artwork flattened into the death silhouette: the character's first `down` frame,
    /// otherwise the first frame of the strip.
    pub fn silhouette(&self, key: ArtKey) -> &Frame {
        match key {
            ArtKey::Character(_) => &self.character[Facing::Down.index()][0],
            other => &self.strip(other)[0],
        }
    }

    pub fn from_tree(root: &AssetNode) -> Result<Self, CatalogError> {
        let player = child(root, "", "player")?;
        let character = Facing::ALL.map(|facing| numbered_strip(player, "player", facing.key()));
        let [left, right, up, down] = character;

        let enemies_node = child(root, "", "enemies")?;
        let [bat, blob, skeleton] =
            EnemyKind::ALL.map(|kind| numbered_strip(enemies_node, "enemies", kind.key()));

        let gun_node = child(root, "", "gun")?;
        Ok(Self {
            character: [left?, right?, up?, down?],
            enemies: [bat?, blob?, skeleton?],
            gun: single(gun_node, "gun", "gun")?,
            bullet: single(gun_node, "gun", "bullet")?,
        })
    }

    /// Solid colour frames so the game runs without any asset files.
    pub fn placeholder() -> Self {
        // Lighten successive frames so the animation is visible.
        let shade = |(r, g, b): (f32, f32, f32), i: usize| {
            let t = 0.12 * i as f32;
            Color::srgb(r + (1.0 - r) * t, g + (1.0 - g) * t, b + (1.0 - b) * t)
        };

        let character = Facing::ALL.map(|facing| {
            let base = match facing {
                Facing::Left => (0.20, 0.62, 0.86),
                Facing::Right => (0.20, 0.70, 0.80),
                Facing::Up => (0.16, 0.55, 0.78),
                Facing::Down => (0.22, 0.75, 0.90),
            };
            (0..4).map(|i| Frame::solid(shade(base, i), Mask::filled(96, 128))).collect()
        });

        let enemies = EnemyKind::ALL.map(|kind| {
            let (base, w, h, n) = match kind {
                EnemyKind::Bat => ((0.55, 0.25, 0.65), 72, 64, 4),
                EnemyKind::Blob => ((0.30, 0.70, 0.30), 64, 64, 4),
                EnemyKind::Skeleton => ((0.85, 0.82, 0.75), 64, 96, 4),
            };
            (0..n).map(|i| Frame::solid(shade(base, i), Mask::filled(w, h))).collect()
        });

        Self {
            character,
            enemies,
            gun: Frame::solid(Color::srgb(0.35, 0.35, 0.40), Mask::filled(72, 20)),
            bullet: Frame::solid(Color::srgb(1.0, 0.85, 0.3), Mask::filled(24, 12)),
        }
    }
}

fn child<'a>(node: &'a AssetNode, path: &str, name: &str) -> Result<&'a AssetNode, CatalogError> {
    let AssetNode::Dir(entries) = node else {
        return Err(CatalogError::NotAFolder(path.to_owned()));
    };
    entries.get(name).ok_or_else(|| CatalogError::Missing(join(path, name)))
}

fn single(node: &AssetNode, path: &str, name: &str) -> Result<Frame, CatalogError> {
    match child(node, path, name)? {
        AssetNode::Frame(frame) => Ok(frame.clone()),
        AssetNode::Dir(_) => Err(CatalogError::NotAFrame(join(path, name))),
    }
}

/// Frames under `path/name`, ordered by their integer key.
fn numbered_strip(node: &AssetNode, path: &str, name: &str) -> Result<Vec<Frame>, CatalogError> {
    let full = join(path, name);
    let AssetNode::Dir(entries) = child(node, path, name)? else {
        return Err(CatalogError::NotAFolder(full));
    };

    let mut numbered = entries
        .iter()
        .map(|(key, node)| {
            let n = key
                .parse::<u32>()
                .map_err(|_| CatalogError::BadFrameKey { path: full.clone(), key: key.clone() })?;
            match node {
                AssetNode::Frame(frame) => Ok((n, frame.clone())),
                AssetNode::Dir(_) => Err(CatalogError::NotAFrame(join(&full, key))),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    if numbered.is_empty() {
        return Err(CatalogError::EmptyStrip(full));
    }
    numbered.sort_by_key(|(n, _)| *n);
    Ok(numbered.into_iter().map(|(_, frame)| frame).collect())
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() { name.to_owned() } else { format!("{path}/{name}") }
}

pub fn plugin(app: &mut App) {
    if app.world().contains_resource::<FrameCatalog>() {
        return;
    }

    let catalog = match app.world_mut().remove_resource::<AssetTree>() {
        Some(tree) => match FrameCatalog::from_tree(&tree.0) {
            Ok(catalog) => catalog,
            Err(err) => {
                reject_input(app, "asset tree", err);
                // Keeps systems that read the catalog valid until the app exits.
                FrameCatalog::placeholder()
            }
        },
        None => {
            info!("No frame catalog supplied; using placeholder artwork");
            FrameCatalog::placeholder()
        }
    };
    app.insert_resource(catalog);
}

#[cfg(test)]
mod tests;
