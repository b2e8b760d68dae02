//! The marching-squares case table and its packed wire form.
//!
//! Cells classify their four corners against the threshold into a 4-bit case
//! (bit 3 = top-left through bit 0 = bottom-right). Each case maps to a
//! polygon outline over the unit cell, mixing fixed corners with points
//! interpolated along a crossed edge. The table also round-trips through a
//! compact 72-byte encoding so worker threads can share one immutable copy.

use crate::vector::Vec2;

/// One outline vertex of a case: either a cell corner, or the threshold
/// crossing on the edge between two corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContourPoint {
    Corner(u8),
    Edge(u8, u8),
}

use ContourPoint::{Corner, Edge};

/// Corner positions in cell-local coordinates: tl, tr, bl, br.
pub const CORNER_OFFSETS: [Vec2; 4] = [
    Vec2 { x: 0.0, y: 0.0 },
    Vec2 { x: 1.0, y: 0.0 },
    Vec2 { x: 0.0, y: 1.0 },
    Vec2 { x: 1.0, y: 1.0 },
];

/// Outlines for all 16 corner cases, indexed by `0b(tl)(tr)(bl)(br)`.
pub const CONTOURS: [&[ContourPoint]; 16] = [
    &[],
    &[Edge(2, 3), Edge(1, 3), Corner(3)],
    &[Edge(0, 2), Edge(2, 3), Corner(2)],
    &[Edge(0, 2), Edge(1, 3), Corner(3), Corner(2)],
    &[Edge(0, 1), Edge(1, 3), Corner(1)],
    &[Edge(0, 1), Edge(2, 3), Corner(3), Corner(1)],
    &[
        Edge(0, 2),
        Edge(0, 1),
        Corner(1),
        Edge(1, 3),
        Edge(2, 3),
        Corner(2),
    ],
    &[Edge(0, 2), Edge(0, 1), Corner(1), Corner(3), Corner(2)],
    &[Corner(0), Edge(0, 1), Edge(0, 2)],
    &[
        Corner(0),
        Edge(0, 1),
        Edge(1, 3),
        Corner(3),
        Edge(2, 3),
        Edge(0, 2),
    ],
    &[Corner(0), Edge(0, 1), Edge(2, 3), Corner(2)],
    &[Corner(0), Edge(0, 1), Edge(1, 3), Corner(3), Corner(2)],
    &[Corner(0), Corner(1), Edge(1, 3), Edge(0, 2)],
    &[Edge(0, 2), Corner(0), Corner(1), Corner(3), Edge(2, 3)],
    &[Corner(0), Corner(1), Edge(1, 3), Edge(2, 3), Corner(2)],
    &[Corner(0), Corner(1), Corner(3), Corner(2)],
];

/// Packs [`CONTOURS`] into 72 bytes.
///
/// Bytes 0..8 hold the case lengths, two 4-bit lengths per byte (even case in
/// the high nibble). Bytes 8..72 hold one big-endian u32 per case: a bit
/// stream of 5-bit points, each a 1-bit kind tag followed by 2-bit corner
/// indices (one for corners, two for edges), with the sign bit always set.
pub fn pack() -> [u8; 72] {
    let mut ret = [0u8; 72];
    for i in (0..CONTOURS.len() - 1).step_by(2) {
        ret[i >> 1] =
            (((CONTOURS[i].len() as u8) & 15) << 4) | ((CONTOURS[i + 1].len() as u8) & 15);
    }
    for (i, contour) in CONTOURS.iter().enumerate() {
        let mut n: u32 = 0x8000_0000;
        let mut j: u32 = 0;

        for point in *contour {
            match *point {
                Corner(c) => {
                    j += 1;
                    n |= ((c as u32) & 3) << j;
                    j += 4;
                }
                Edge(a, b) => {
                    n |= 1 << j;
                    j += 1;
                    n |= ((a as u32) & 3) << j;
                    j += 2;
                    n |= ((b as u32) & 3) << j;
                    j += 2;
                }
            }
        }

        let s = (i << 2) + 8;
        ret[s..s + 4].copy_from_slice(&n.to_be_bytes());
    }
    ret
}

/// Decodes one case outline from a packed table.
pub fn unpack_entry(bytes: &[u8; 72], case: u8) -> Vec<ContourPoint> {
    let case = (case & 15) as usize;
    let mut len = bytes[case >> 1];
    if case & 1 == 0 {
        len >>= 4;
    }
    len &= 15;

    let s = (case << 2) + 8;
    let n = u32::from_be_bytes([bytes[s], bytes[s + 1], bytes[s + 2], bytes[s + 3]]);
    let mut z: u32 = 0;

    let mut ret = Vec::with_capacity(len as usize);
    for _ in 0..len {
        if n & (1 << z) != 0 {
            z += 1;
            let a = ((n >> z) & 3) as u8;
            z += 2;
            let b = ((n >> z) & 3) as u8;
            z += 2;
            ret.push(Edge(a, b));
        } else {
            z += 1;
            ret.push(Corner(((n >> z) & 3) as u8));
            z += 4;
        }
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_round_trips_every_case() {
        let bytes = pack();
        for case in 0..16u8 {
            assert_eq!(
                unpack_entry(&bytes, case),
                CONTOURS[case as usize],
                "case {}",
                case
            );
        }
    }

    #[test]
    fn test_length_nibbles() {
        let bytes = pack();
        assert_eq!(bytes[0] >> 4, 0);
        assert_eq!(bytes[0] & 15, 3);
        assert_eq!(bytes[7] >> 4, 5);
        assert_eq!(bytes[7] & 15, 4);
    }
}
