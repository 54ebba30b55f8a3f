//! Integrity payloads for tamper-evident quotes

/// Types that can be covered by an HMAC integrity checksum
///
/// The payload is a canonical string over every field a client could tamper
/// with between receiving a quote and asking for it to be built.
pub trait IntegrityPayload {
	fn to_integrity_payload(&self) -> String;
}

/// Constant-time byte comparison
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
	if a.len() != b.len() {
		return false;
	}

	a.iter()
		.zip(b.iter())
		.fold(0u8, |acc, (x, y)| acc | (x ^ y))
		== 0
}
