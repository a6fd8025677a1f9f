//! The storage-growth policy repeated fields use (spec §4.4): physical
//! capacity grows in discrete steps ahead of the logical length, and the
//! tail beyond the logical length is never inspected or marshalled.
//!
//! Shared here as a single reusable policy rather than re-derived by each
//! emitted `Add<F>` (the growth *arithmetic* is identical for every
//! repeated field regardless of element type; only the tag/wire-type
//! handling around it differs per field).

/// Grows `backing` so its length is at least `needed_len`, following the
/// policy: 8 if currently empty, 2x if current capacity is under one
/// million, otherwise +1,000,000. New slots are filled with `T::default()`.
/// A no-op if `backing` already has at least `needed_len` elements.
pub fn grow_to_fit<T: Default + Clone>(backing: &mut Vec<T>, needed_len: usize) {
    let mut capacity = backing.len();
    if capacity >= needed_len {
        return;
    }
    while capacity < needed_len {
        capacity = if capacity == 0 {
            8
        } else if capacity < 1_000_000 {
            capacity * 2
        } else {
            capacity + 1_000_000
        };
    }
    backing.resize(capacity, T::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_from_empty_to_eight() {
        let mut v: Vec<i32> = Vec::new();
        grow_to_fit(&mut v, 1);
        assert_eq!(v.len(), 8);
    }

    #[test]
    fn doubles_while_under_a_million() {
        let mut v = vec![0i32; 8];
        grow_to_fit(&mut v, 9);
        assert_eq!(v.len(), 16);

        let mut v = vec![0i32; 999_999];
        grow_to_fit(&mut v, 1_000_000);
        assert_eq!(v.len(), 1_999_998);
    }

    #[test]
    fn adds_a_million_past_the_threshold() {
        let mut v = vec![0i32; 1_000_000];
        grow_to_fit(&mut v, 1_000_001);
        assert_eq!(v.len(), 2_000_000);
    }

    #[test]
    fn already_sufficient_capacity_is_a_no_op() {
        let mut v = vec![1i32; 16];
        grow_to_fit(&mut v, 4);
        assert_eq!(v, vec![1i32; 16]);
    }

    #[test]
    fn tail_beyond_len_is_default_initialized() {
        let mut v: Vec<i32> = Vec::new();
        grow_to_fit(&mut v, 3);
        assert_eq!(v, vec![0, 0, 0, 0, 0, 0, 0, 0]);
    }
}
