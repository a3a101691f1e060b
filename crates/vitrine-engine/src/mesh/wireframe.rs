use std::collections::HashSet;

use super::Indices;

/// Converts a triangle list into a line list containing each edge once.
///
/// Edges keep the order in which they are first met. A trailing partial
/// triangle is ignored.
pub(crate) fn edge_indices(triangles: &Indices) -> Indices {
    let tri: Vec<u32> = triangles.iter().collect();
    let mut seen = HashSet::with_capacity(tri.len());
    let mut lines = Vec::with_capacity(tri.len());

    for t in tri.chunks_exact(3) {
        for (a, b) in [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])] {
            let key = (a.min(b), a.max(b));
            if seen.insert(key) {
                lines.push(a);
                lines.push(b);
            }
        }
    }

    match triangles {
        Indices::U16(_) => Indices::U16(lines.into_iter().map(|i| i as u16).collect()),
        Indices::U32(_) => Indices::U32(lines),
    }
}
