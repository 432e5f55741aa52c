mod common;

use common::*;
use hpp_signer::{HppError, IncomingPayload, ResponseVerifier, SignatureScheme};

fn verifier() -> ResponseVerifier {
    ResponseVerifier::new(&config()).unwrap()
}

fn verifier_for(scheme: SignatureScheme) -> ResponseVerifier {
    ResponseVerifier::new(&config().with_scheme(scheme)).unwrap()
}

const SCHEMES: [SignatureScheme; 2] = [SignatureScheme::Sha1, SignatureScheme::Md5];

fn authorised_payload() -> IncomingPayload {
    processor_payload(SignatureScheme::Sha1, &callback_fields(), SECRET)
}

#[test]
fn test_golden_callback_verifies() {
    let mut payload = IncomingPayload::from_iter(callback_fields());
    payload.insert("SHA1HASH", GOLDEN_CALLBACK_SHA1);

    let result = verifier().verify(&payload).unwrap();
    assert_eq!(result.order_id(), ORDER_ID);
    assert_eq!(result.authcode(), "12345");
    assert!(result.is_authorised());
}

#[test]
fn test_result_changed_by_one_character_fails() {
    let mut payload = IncomingPayload::from_iter(callback_fields());
    payload.insert("SHA1HASH", GOLDEN_CALLBACK_SHA1);
    payload.insert("RESULT", "01");

    assert!(matches!(
        verifier().verify(&payload),
        Err(HppError::SignatureMismatch { .. })
    ));
}

#[test]
fn test_verification_is_idempotent() {
    let payload = authorised_payload();
    let verifier = verifier();
    let first = verifier.verify(&payload).unwrap();
    let second = verifier.verify(&payload).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_each_missing_field_is_named() {
    for scheme in SCHEMES {
        for field in scheme.response_fields() {
            let mut payload = processor_payload(scheme, &callback_fields(), SECRET);
            assert!(payload.remove(field));

            match verifier_for(scheme).verify(&payload) {
                Err(HppError::MissingField(missing)) => assert_eq!(&missing, field),
                other => panic!("{scheme}: expected MissingField({field}), got {other:?}"),
            }
        }
    }
}

#[test]
fn test_missing_field_reported_even_with_bad_signature() {
    let mut payload = authorised_payload();
    payload.insert("SHA1HASH", "not-a-hash");
    payload.remove("AUTHCODE");

    assert!(matches!(
        verifier().verify(&payload),
        Err(HppError::MissingField(field)) if field == "AUTHCODE"
    ));
}

#[test]
fn test_tampering_any_signed_field_fails() {
    for scheme in SCHEMES {
        let verifier = verifier_for(scheme);
        assert!(verifier
            .verify(&processor_payload(scheme, &callback_fields(), SECRET))
            .is_ok());

        for field in scheme.signed_response_fields() {
            let mut payload = processor_payload(scheme, &callback_fields(), SECRET);
            payload.insert(*field, "tampered");

            assert!(
                matches!(
                    verifier.verify(&payload),
                    Err(HppError::SignatureMismatch { .. })
                ),
                "{scheme}: tampering {field} was not detected"
            );
        }
    }
}

#[test]
fn test_unsigned_extras_pass_through_untouched() {
    let mut fields = callback_fields();
    fields.push(("BASKET_ID", "b-7".to_string()));
    fields.push(("COMMENT1", "Thanks & goodbye".to_string()));
    let payload = processor_payload(SignatureScheme::Sha1, &fields, SECRET);

    let result = verifier().verify(&payload).unwrap();
    assert_eq!(result.get("basket_id"), Some("b-7"));
    assert_eq!(result.get("comment1"), Some("Thanks & goodbye"));
    assert_eq!(result.get("sha1hash"), Some(GOLDEN_CALLBACK_SHA1));
}

#[test]
fn test_declined_payment_still_verifies() {
    let mut fields = callback_fields();
    fields[3].1 = "101".to_string();
    fields[4].1 = "Declined".to_string();
    let payload = processor_payload(SignatureScheme::Sha1, &fields, SECRET);

    let result = verifier().verify(&payload).unwrap();
    assert!(!result.is_authorised());
    assert_eq!(result.message(), "Declined");
}

#[test]
fn test_legacy_md5_callback() {
    let config = config().with_scheme(SignatureScheme::Md5);
    let verifier = ResponseVerifier::new(&config).unwrap();

    let payload = processor_payload(SignatureScheme::Md5, &callback_fields(), SECRET);
    assert!(verifier.verify(&payload).is_ok());

    let sha1_payload = authorised_payload();
    assert!(matches!(
        verifier.verify(&sha1_payload),
        Err(HppError::MissingField(field)) if field == "MD5HASH"
    ));
}

#[test]
fn test_callback_signed_with_other_secret_fails() {
    let payload = processor_payload(SignatureScheme::Sha1, &callback_fields(), "other-secret");
    assert!(matches!(
        verifier().verify(&payload),
        Err(HppError::SignatureMismatch { .. })
    ));
}
