use crate::InvalidInput;

/// Computes the Nim-sum (bitwise XOR of all heap sizes) of a position.
///
/// The result is zero iff the position is balanced, that is a P-position for
/// the player about to move under normal play. XOR is commutative and
/// associative, so the order of the heaps does not matter.
///
/// # Errors
///
/// Returns [`InvalidInput`] when fewer than two heaps are given.
///
/// # Example
///
/// ```
/// use oxinim_engine::nim_sum;
///
/// assert_eq!(nim_sum(&[3, 4, 5]), Ok(2));
/// assert_eq!(nim_sum(&[1, 4, 5]), Ok(0));
/// assert!(nim_sum(&[7]).is_err());
/// ```
pub fn nim_sum(heaps: &[u32]) -> Result<u32, InvalidInput> {
    if heaps.len() < 2 {
        return Err(InvalidInput { len: heaps.len() });
    }
    Ok(xor_all(heaps))
}

#[inline]
pub(crate) fn xor_all(heaps: &[u32]) -> u32 {
    heaps.iter().fold(0, |acc, &size| acc ^ size)
}
