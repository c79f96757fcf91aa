use super::*;

const NOW_MS: i64 = 1_700_000_000_000;

fn encode(json: &str) -> String {
    URL_SAFE_NO_PAD.encode(json.as_bytes())
}

fn make_token(payload_json: &str) -> String {
    format!("{}.{}.c2lnbmF0dXJl", encode("{\"alg\":\"HS256\",\"typ\":\"JWT\"}"), encode(payload_json))
}

// =============================================================
// has_valid_shape
// =============================================================

#[test]
fn shape_accepts_three_segments() {
    assert!(has_valid_shape("aGVhZA.cGF5bG9hZA.c2ln"));
}

#[test]
fn shape_accepts_extended_signature_alphabet() {
    assert!(has_valid_shape("aGVhZA.cGF5bG9hZA.ab+/cd.ef=="));
}

#[test]
fn shape_accepts_empty_signature() {
    assert!(has_valid_shape("aGVhZA.cGF5bG9hZA."));
}

#[test]
fn shape_rejects_missing_segments() {
    assert!(!has_valid_shape(""));
    assert!(!has_valid_shape("test-token"));
    assert!(!has_valid_shape("aGVhZA.cGF5bG9hZA"));
    assert!(!has_valid_shape(".cGF5bG9hZA.c2ln"));
}

#[test]
fn shape_rejects_foreign_characters_in_payload() {
    assert!(!has_valid_shape("aGVhZA.cGF5+bG9hZA.c2ln"));
    assert!(!has_valid_shape("aGVhZA.cGF5 bG9hZA.c2ln"));
}

// =============================================================
// decode_claims
// =============================================================

#[test]
fn decode_reads_integer_exp() {
    let token = make_token("{\"sub\":\"1\",\"exp\":1700003600}");
    assert_eq!(decode_claims(&token), Ok(TokenClaims { exp: Some(1_700_003_600) }));
}

#[test]
fn decode_floors_fractional_exp() {
    let token = make_token("{\"exp\":1700003600.9}");
    assert_eq!(decode_claims(&token).unwrap().exp, Some(1_700_003_600));
}

#[test]
fn decode_without_exp_has_no_expiry() {
    let token = make_token("{\"sub\":\"1\"}");
    assert_eq!(decode_claims(&token), Ok(TokenClaims { exp: None }));
}

#[test]
fn decode_tolerates_padded_payload() {
    let payload = base64::engine::general_purpose::URL_SAFE.encode(b"{\"exp\":10}");
    assert!(payload.ends_with('='));
    let token = format!("aGVhZA.{payload}.c2ln");
    assert_eq!(decode_claims(&token).unwrap().exp, Some(10));
}

#[test]
fn decode_rejects_non_base64_payload() {
    assert!(matches!(decode_claims("aGVhZA.a.c2ln"), Err(TokenError::PayloadEncoding(_))));
}

#[test]
fn decode_rejects_non_json_payload() {
    let token = format!("aGVhZA.{}.c2ln", encode("not json"));
    assert_eq!(decode_claims(&token), Err(TokenError::PayloadJson));
}

#[test]
fn decode_rejects_non_object_payload() {
    let token = format!("aGVhZA.{}.c2ln", encode("[1,2,3]"));
    assert_eq!(decode_claims(&token), Err(TokenError::PayloadJson));
}

#[test]
fn decode_rejects_string_exp() {
    let token = make_token("{\"exp\":\"tomorrow\"}");
    assert_eq!(decode_claims(&token), Err(TokenError::InvalidExpiry));
}

// =============================================================
// check_token
// =============================================================

#[test]
fn check_accepts_future_exp() {
    let token = make_token("{\"exp\":1700003600}");
    assert!(check_token(&token, NOW_MS).is_ok());
}

#[test]
fn check_rejects_exp_one_hour_ago() {
    let token = make_token("{\"exp\":1699996400}");
    assert_eq!(
        check_token(&token, NOW_MS),
        Err(TokenError::Expired { exp: 1_699_996_400, now_ms: NOW_MS })
    );
}

#[test]
fn check_keeps_token_valid_at_exact_expiry() {
    let token = make_token("{\"exp\":1700000000}");
    assert!(check_token(&token, NOW_MS).is_ok());
    assert!(check_token(&token, NOW_MS + 1).is_err());
}

#[test]
fn check_rejects_malformed_before_decoding() {
    assert_eq!(check_token("test-token", NOW_MS), Err(TokenError::Malformed));
}

#[test]
fn huge_exp_does_not_overflow() {
    let claims = TokenClaims { exp: Some(i64::MAX) };
    assert!(!claims.is_expired_at(NOW_MS));
}
