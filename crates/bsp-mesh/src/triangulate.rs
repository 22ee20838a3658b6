//! Fan triangulation.

/// Split a polygon boundary into triangles sharing its first vertex.
///
/// An `n`-gon yields `n - 2` triangles `(p[0], p[k + 1], p[k + 2])`. Fewer than
/// three points yield nothing. Concave boundaries come out overlapping.
pub fn fan<T: Copy>(boundary: &[T]) -> impl Iterator<Item = [T; 3]> + '_ {
    let apex = boundary.first().copied();
    boundary
        .get(1..)
        .unwrap_or_default()
        .windows(2)
        .filter_map(move |pair| apex.map(|a| [a, pair[0], pair[1]]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn quad_gives_two_triangles() {
        let tris: Vec<_> = fan(&[0, 1, 2, 3]).collect();
        assert_eq!(tris, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn triangle_passes_through() {
        let tris: Vec<_> = fan(&['a', 'b', 'c']).collect();
        assert_eq!(tris, vec![['a', 'b', 'c']]);
    }

    #[test]
    fn short_boundaries_yield_nothing() {
        assert_eq!(fan::<u8>(&[]).count(), 0);
        assert_eq!(fan(&[1]).count(), 0);
        assert_eq!(fan(&[1, 2]).count(), 0);
    }

    proptest! {
        #[test]
        fn n_minus_two_triangles(n in 0usize..200) {
            let boundary: Vec<usize> = (0..n).collect();
            let tris: Vec<_> = fan(&boundary).collect();
            prop_assert_eq!(tris.len(), n.saturating_sub(2));
            for (k, tri) in tris.iter().enumerate() {
                prop_assert_eq!(*tri, [0, k + 1, k + 2]);
            }
        }
    }
}
