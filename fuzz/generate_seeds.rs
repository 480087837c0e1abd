#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: i32, height: i32, bits: u16, palette: &[[u8; 4]], pixels: &[u8]) -> Vec<u8> {
    let offset = 54 + palette.len() * 4;
    let size = offset + pixels.len();
    let mut out = vec![0u8; 54];
    out[0] = b'B'; out[1] = b'M';
    out[2..6].copy_from_slice(&(size as u32).to_le_bytes()); // file size
    out[10..14].copy_from_slice(&(offset as u32).to_le_bytes()); // data offset
    out[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    out[18..22].copy_from_slice(&width.to_le_bytes());
    out[22..26].copy_from_slice(&height.to_le_bytes());
    out[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    out[28..30].copy_from_slice(&bits.to_le_bytes());
    out[46..50].copy_from_slice(&(palette.len() as u32).to_le_bytes()); // colors used
    for entry in palette {
        out.extend_from_slice(entry);
    }
    out.extend_from_slice(pixels);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 24-bit 1x1 bottom-up: 3 bytes BGR + 1 padding
    fs::write(format!("{dir}/bgr_1x1.bmp"), bmp(1, 1, 24, &[], &[0xff, 0, 0, 0])).unwrap();

    // 24-bit 2x2 top-down
    let px = [1, 2, 3, 4, 5, 6, 0, 0, 7, 8, 9, 10, 11, 12, 0, 0];
    fs::write(format!("{dir}/bgr_2x2_topdown.bmp"), bmp(2, -2, 24, &[], &px)).unwrap();

    // 8-bit 3x2 with a 4-entry palette
    let pal = [[0, 0, 0, 0], [255, 0, 0, 0], [0, 255, 0, 0], [0, 0, 255, 0]];
    let idx = [0, 1, 2, 0, 3, 2, 1, 0];
    fs::write(format!("{dir}/indexed_3x2.bmp"), bmp(3, 2, 8, &pal, &idx)).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    let mut rle = bmp(1, 1, 8, &pal, &[0, 0, 0, 0]);
    rle[30..34].copy_from_slice(&1u32.to_le_bytes()); // BI_RLE8
    fs::write(format!("{dir}/rle8.bin"), rle).unwrap();

    println!("Generated seed corpus in {dir}/");
}
