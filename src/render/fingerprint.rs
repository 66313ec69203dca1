use crate::foundation::core::{Affine, BezPath, Rgba8Premul};
use crate::scene::plan::{DrawOp, FramePlan};
use kurbo::PathEl;
use xxhash_rust::xxh3::Xxh3;

const XXH3_SEED: u64 = 0x5d1e_c0a7_3b9f_4e21;

/// Stable 128-bit digest of a frame plan's geometry, paint and canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl std::fmt::Display for FrameFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Hash every op of `plan` bit-exactly (floats by their bit patterns).
pub fn fingerprint_plan(plan: &FramePlan) -> FrameFingerprint {
    let mut h = StableHasher::new();
    h.write_u32(plan.canvas.width);
    h.write_u32(plan.canvas.height);
    match plan.clear {
        Some(c) => {
            h.write_u8(1);
            write_color(&mut h, c);
        }
        None => h.write_u8(0),
    }
    h.write_u64(plan.ops.len() as u64);
    for op in &plan.ops {
        write_op(&mut h, op);
    }
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

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn finish(self) -> FrameFingerprint {
        let v = self.inner.digest128();
        FrameFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_op(h: &mut StableHasher, op: &DrawOp) {
    match op {
        DrawOp::FillPath {
            path,
            transform,
            color,
        } => {
            h.write_u8(0);
            write_path(h, path);
            write_affine(h, *transform);
            write_color(h, *color);
        }
        DrawOp::StrokePath {
            path,
            transform,
            color,
            width,
        } => {
            h.write_u8(1);
            write_path(h, path);
            write_affine(h, *transform);
            write_color(h, *color);
            h.write_f64(*width);
        }
    }
}

fn write_path(h: &mut StableHasher, path: &BezPath) {
    h.write_u64(path.elements().len() as u64);
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                h.write_u8(0);
                h.write_f64(p.x);
                h.write_f64(p.y);
            }
            PathEl::LineTo(p) => {
                h.write_u8(1);
                h.write_f64(p.x);
                h.write_f64(p.y);
            }
            PathEl::QuadTo(p1, p2) => {
                h.write_u8(2);
                for p in [p1, p2] {
                    h.write_f64(p.x);
                    h.write_f64(p.y);
                }
            }
            PathEl::CurveTo(p1, p2, p3) => {
                h.write_u8(3);
                for p in [p1, p2, p3] {
                    h.write_f64(p.x);
                    h.write_f64(p.y);
                }
            }
            PathEl::ClosePath => h.write_u8(4),
        }
    }
}

fn write_affine(h: &mut StableHasher, a: Affine) {
    for c in a.as_coeffs() {
        h.write_f64(c);
    }
}

fn write_color(h: &mut StableHasher, c: Rgba8Premul) {
    h.write_bytes(&c.to_array());
}
