use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// IEC 61966-2-1 decoding of one normalized sRGB channel.
fn srgb_to_linear(srgb: f64) -> f64 {
    if srgb <= 0.04045 {
        srgb / 12.92
    } else {
        ((srgb + 0.055) / 1.055).powf(2.4)
    }
}

fn write_lut(path: &Path) -> io::Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "/// Linear light value for every 8-bit sRGB channel value.")?;
    writeln!(file, "pub static SRGB8_TO_LINEAR: [f32; 256] = [")?;
    for i in 0..256u32 {
        if i > 0 && i % 8 == 0 {
            writeln!(file)?;
        }
        write!(file, "    {:.9},", srgb_to_linear(i as f64 / 255.0) as f32)?;
    }
    writeln!(file, "\n];")?;
    Ok(())
}

fn main() {
    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR for build scripts");
    let dest = Path::new(&out_dir).join("srgb8_lut.rs");
    write_lut(&dest).expect("failed to write sRGB lookup table");
    println!("cargo::rerun-if-changed=build.rs");
}
