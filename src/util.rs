/// Splits off the first `N` bytes as an array
#[inline]
pub(crate) fn get_split<const N: usize>(data: &[u8]) -> Option<([u8; N], &[u8])> {
    let (head, rest) = data.split_first_chunk::<N>()?;
    Some((*head, rest))
}

#[inline]
pub(crate) fn be_i32(data: [u8; 4]) -> i32 {
    i32::from_be_bytes(data)
}

#[inline]
pub(crate) fn be_f64(data: [u8; 8]) -> f64 {
    f64::from_be_bytes(data)
}
