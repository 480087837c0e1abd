#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce the same image
    let Ok(decoded) = DecodeRequest::new(data)
        .with_permissiveness(Permissiveness::Permissive)
        .decode()
    else {
        return;
    };

    let reencoded = encode(&decoded).expect("decoded image must re-encode");
    let Ok(mut decoded2) = decode(&reencoded) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded.width(), decoded2.width());
    assert_eq!(decoded.height(), decoded2.height());
    assert_eq!(decoded.orientation(), decoded2.orientation());
    assert_eq!(decoded.palette(), decoded2.palette());
    for y in 0..decoded.height() {
        assert_eq!(decoded.visual_row(y), decoded2.visual_row(y), "row {y} mismatch");
    }

    // Negation is an involution and a flipped copy compares equal
    let mut twice = decoded.clone();
    twice.negate();
    twice.negate();
    assert_eq!(twice, decoded);

    let mut first = decoded;
    assert!(compare(&mut first, &mut decoded2).expect("same geometry").is_same());
});
