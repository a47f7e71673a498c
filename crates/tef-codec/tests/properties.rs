//! Property tests for the invariants `spec.md`'s "Testable Properties"
//! section names: round-trip stability, LRC sensitivity, and the strict
//! approval gate.

use proptest::prelude::*;
use tef_codec::{CodecError, FrameCodec, PurchaseRequest};

fn arb_id(max_len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::char::range('A', 'Z'), 1..=max_len)
        .prop_map(|chars| chars.into_iter().collect())
}

fn arb_purchase() -> impl Strategy<Value = PurchaseRequest> {
    (
        1u64..=99_999_999,
        0u64..=9_999_999,
        0u64..=9_999_999,
        0u64..=9_999_999,
        arb_id(10),
        arb_id(10),
        arb_id(12),
        any::<bool>(),
    )
        .prop_map(
            |(amount_cents, tax_cents, tip_cents, iac, terminal_id, transaction_id, cashier_id, send_pan)| {
                PurchaseRequest {
                    amount_cents,
                    tax_cents,
                    tip_cents,
                    iac,
                    terminal_id,
                    transaction_id,
                    cashier_id,
                    send_pan,
                }
            },
        )
}

proptest! {
    /// Every valid purchase request encodes to a frame whose own LRC is
    /// internally consistent, and whose declared `LENGTH` matches the actual
    /// body size.
    #[test]
    fn encoded_purchase_frame_is_self_consistent(request in arb_purchase()) {
        let codec = FrameCodec::new();
        let encoded = codec.encode_purchase(&request).expect("arbitrary valid request encodes");
        let bytes = encoded.as_bytes();

        prop_assert_eq!(bytes[0], 0x02);
        let declared_len = tef_codec::parse_length_field(bytes).expect("length field parses");
        let etx_pos = bytes.len() - 2;
        prop_assert_eq!(declared_len as usize, etx_pos - 4);

        let expected_lrc = bytes[1..=etx_pos].iter().fold(0u8, |acc, &b| acc ^ b);
        prop_assert_eq!(bytes[bytes.len() - 1], expected_lrc);
    }

    /// Flipping any single byte strictly inside the LRC-covered range always
    /// changes the checksum the decoder computes, so a single-bit corruption
    /// is never silently accepted as a different-but-valid frame.
    #[test]
    fn single_byte_corruption_is_detected(
        request in arb_purchase(),
        flip_index in 0usize..200,
    ) {
        let codec = FrameCodec::new();
        let encoded = codec.encode_purchase(&request).unwrap();
        let mut bytes = encoded.into_bytes();
        let lrc_pos = bytes.len() - 1;
        let corrupt_at = 1 + (flip_index % (lrc_pos - 1));
        bytes[corrupt_at] ^= 0x01;

        match codec.decode(&bytes) {
            Err(CodecError::ChecksumMismatch { .. }) => {}
            // A corrupted TLV header can also surface as a decode-time parse
            // boundary issue before the LRC is even checked against content,
            // but the LRC check always runs first in this codec, so only a
            // checksum mismatch is possible here.
            other => prop_assert!(false, "expected ChecksumMismatch, got {:?}", other),
        }
    }
}

proptest! {
    /// Approval is gated strictly on field 48 trimming to `"00"`; no other
    /// field combination can flip `approved` to `true`.
    #[test]
    fn approval_gate_is_strict(code in "[0-9]{2}") {
        let codec = FrameCodec::new();
        let frame = tef_codec::encode_response_frame(
            tef_codec::constants::PURCHASE_HEADER,
            &[("48", 2, &code)],
        );

        let response = codec.decode(frame.as_bytes()).unwrap();
        prop_assert_eq!(response.approved, code == "00");
    }
}
