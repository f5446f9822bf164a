use ring::constant_time;

/// Compare the computed signature with the claimed one.
///
/// Byte for byte, no case or whitespace normalization. Run time does not depend on
/// how long the matching prefix is.
pub fn signatures_match(computed: &str, claimed: &str) -> bool {
    constant_time::verify_slices_are_equal(computed.as_bytes(), claimed.as_bytes()).is_ok()
}
