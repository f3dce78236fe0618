use xxhash_rust::xxh3::Xxh3;

use crate::{
    composition::model::{CompositionNode, NodeKind, TextRole},
    subtitles::words::WordColor,
};

const XXH3_SEED: u64 = 0x6f6b_7265_656c_0001;

/// Stable 128-bit fingerprint of a render tree.
///
/// Equal trees always hash equal, across runs and platforms, so renderers can key
/// frame caches on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct TreeFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl std::fmt::Display for TreeFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Fingerprint `tree` structurally (ids, windows, payloads, child order).
pub fn fingerprint_tree(tree: &CompositionNode) -> TreeFingerprint {
    let mut h = StableHasher::new();
    write_node(&mut h, tree);
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f32(&mut self, v: f32) {
        self.write_u32(v.to_bits());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    // Length-prefixed so adjacent strings cannot alias.
    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> TreeFingerprint {
        let v = self.inner.digest128();
        TreeFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_node(h: &mut StableHasher, node: &CompositionNode) {
    h.write_str(&node.id);
    h.write_u64(node.start_frame.0);
    h.write_u64(node.duration_in_frames);
    match &node.kind {
        NodeKind::Sequence => h.write_u8(0),
        NodeKind::Parallel => h.write_u8(1),
        NodeKind::Clip { path, looped } => {
            h.write_u8(2);
            h.write_str(path);
            h.write_bool(*looped);
        }
        NodeKind::Audio { src, volume } => {
            h.write_u8(3);
            h.write_str(src);
            h.write_f64(*volume);
        }
        NodeKind::Text {
            text,
            role,
            color,
            style,
        } => {
            h.write_u8(4);
            h.write_str(text);
            h.write_u8(match role {
                TextRole::Hook => 0,
                TextRole::Word => 1,
            });
            write_opt_color(h, *color);
            h.write_f32(style.text_size_px);
            h.write_f32(style.stroke_size_px);
        }
    }
    h.write_u32(node.children.len() as u32);
    for child in &node.children {
        write_node(h, child);
    }
}

fn write_opt_color(h: &mut StableHasher, color: Option<WordColor>) {
    let tag = match color {
        None => 0,
        Some(WordColor::White) => 1,
        Some(WordColor::Yellow) => 2,
        Some(WordColor::Red) => 3,
        Some(WordColor::Green) => 4,
        Some(WordColor::Purple) => 5,
    };
    h.write_u8(tag);
}

#[cfg(test)]
#[path = "../../tests/unit/composition/fingerprint.rs"]
mod tests;
