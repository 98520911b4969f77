//! Care lookup links encoded in garment QR codes.

/// Path prefix of the public care lookup route.
pub const CARE_PATH: &str = "/care";

/// Build the public URL for a care lookup.
///
/// `base` is a domain (`greenthreads.example`) or an origin with scheme
/// (`http://localhost:3000`); a bare domain gets `https://`.
pub fn care_url(base: &str, qr_code_id: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    if base.starts_with("http://") || base.starts_with("https://") {
        format!("{base}{CARE_PATH}/{qr_code_id}")
    } else {
        format!("https://{base}{CARE_PATH}/{qr_code_id}")
    }
}
