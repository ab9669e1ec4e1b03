#![no_main]

// This fuzz test compares our DXT1 decoder against rgbcx-sys using the Ideal method.
// Only four colour blocks are compared; three colour blocks differ between decoders.

use dxt_squish_codec::decompress_block;
use dxt_squish_codec::flags::DXT1;
use libfuzzer_sys::{arbitrary, fuzz_target};
use rgbcx_sys::root::rgbcx;

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Dxt1Block {
    pub bytes: [u8; 8],
}

fuzz_target!(|block: Dxt1Block| {
    let c0 = u16::from_le_bytes([block.bytes[0], block.bytes[1]]);
    let c1 = u16::from_le_bytes([block.bytes[2], block.bytes[3]]);
    if c0 <= c1 {
        return;
    }

    let ours = decompress_block(&block.bytes, DXT1);

    let mut reference = [0u8; 64];
    unsafe {
        rgbcx::unpack_bc1(
            block.bytes.as_ptr() as *const ::std::os::raw::c_void,
            reference.as_mut_ptr() as *mut ::std::os::raw::c_void,
            true, // set_alpha
            rgbcx::bc1_approx_mode::cBC1Ideal,
        );
    }

    assert_eq!(ours, reference, "Decoded blocks don't match");
});
