#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::{DecodeRequest, ImageInfo, Permissiveness};

fuzz_target!(|data: &[u8]| {
    // Every strictness level must reject or accept without panicking
    let _ = ImageInfo::from_bytes(data);
    for level in [
        Permissiveness::Strict,
        Permissiveness::Standard,
        Permissiveness::Permissive,
    ] {
        let _ = DecodeRequest::new(data).with_permissiveness(level).decode();
    }
});
