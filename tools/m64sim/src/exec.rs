use std::fs;
use std::path::Path;

use anyhow::Context;
use m64_mpu::{FlatRam, Mpu, MpuConfig, RESET_VECTOR};
use tracing::{debug, info};

use crate::helpers::{Dump, format_words, word_address};

pub fn run_program(
    path: &Path,
    origin: u16,
    max_cycles: u64,
    dump: Dump,
    halt_on_brk: bool,
) -> anyhow::Result<()> {
    let program = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    debug!("loaded {} bytes from {}", program.len(), path.display());

    let mut ram = FlatRam::new();
    ram.load(origin, &program)?;
    ram.set_vector(RESET_VECTOR, origin);

    let mut mpu = Mpu::new(MpuConfig { halt_on_brk, ..Default::default() });
    mpu.reset(&mut ram);

    let cycles = mpu
        .run(&mut ram, max_cycles)
        .with_context(|| format!("program stopped abnormally ({})", mpu))?;
    info!("stopped after {} cycles", cycles);

    println!("cycles: {}", cycles);
    println!("{}", mpu);
    let words = (0..dump.count).map(|i| ram.read_word(word_address(dump.address, i)) as i16);
    print!("{}", format_words(dump.address, words));

    Ok(())
}
