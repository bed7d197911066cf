//! Thin I/O wrapper around the LT codec core: chunk a file into blocks,
//! encode a symbol stream to a file, or decode a symbol stream back into a
//! file. Grounded in `loic-fejoz-hqfbp-rs/src/bin/pack.rs` and
//! `src/bin/unpack.rs` for the `clap`/`log`/`anyhow` shape; the
//! chunk-then-encode-then-decode flow mirrors
//! `original_source/lt_codes.py`'s top-level script, which this replaces.
//!
//! The symbol framing here (`index: u64 LE`, `degree: u32 LE`, `data:
//! packet_size bytes`, each symbol preceded by nothing else) is a deployment
//! choice of this binary, not part of the library's public contract — the
//! core never defines wire framing (see spec's Non-goals).

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use lt_codec::{Config, Decoder, Distribution, Encoder, Symbol, WordWidth};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Encode or decode files with the LT rateless erasure codec.")]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[arg(long, short, global = true, help = "Enable verbose logging (DEBUG level)")]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Chunk a file into K blocks and emit N encoded symbols.
    Encode {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, default_value_t = 4096)]
        packet_size: usize,
        #[arg(long, default_value_t = 2.0)]
        redundancy: f64,
        #[arg(long)]
        systematic: bool,
    },
    /// Reconstruct a file from a symbol stream produced by `encode`.
    Decode {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, help = "Original file length in bytes")]
        length: u64,
        #[arg(long, default_value_t = 4096)]
        packet_size: usize,
        #[arg(long)]
        systematic: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter(None, level)
        .format_timestamp(None)
        .init();

    match args.command {
        Command::Encode {
            input,
            output,
            packet_size,
            redundancy,
            systematic,
        } => encode_file(&input, &output, packet_size, redundancy, systematic),
        Command::Decode {
            input,
            output,
            length,
            packet_size,
            systematic,
        } => decode_file(&input, &output, length, packet_size, systematic),
    }
}

fn chunk_into_blocks(data: &[u8], packet_size: usize) -> Vec<Vec<u8>> {
    data.chunks(packet_size)
        .map(|chunk| {
            let mut block = vec![0u8; packet_size];
            block[..chunk.len()].copy_from_slice(chunk);
            block
        })
        .collect()
}

fn encode_file(
    input: &PathBuf,
    output: &PathBuf,
    packet_size: usize,
    redundancy: f64,
    systematic: bool,
) -> Result<()> {
    let mut data = Vec::new();
    File::open(input)
        .with_context(|| format!("opening {}", input.display()))?
        .read_to_end(&mut data)?;

    let config = Config {
        packet_size,
        systematic,
        redundancy,
        ..Config::default()
    };
    let blocks = chunk_into_blocks(&data, packet_size);
    let k = blocks.len();
    println!("Input: {} bytes, K={k} blocks of {packet_size} bytes", data.len());

    let encoder = Encoder::new(blocks, config).context("building encoder")?;
    let n = config.drop_count(k);
    println!("Encoding {n} symbols (redundancy {redundancy})...");

    let mut writer = BufWriter::new(
        File::create(output).with_context(|| format!("creating {}", output.display()))?,
    );
    for symbol in encoder.encode(n)? {
        write_symbol(&mut writer, &symbol)?;
    }
    writer.flush()?;
    println!("Wrote {} to {}", n, output.display());
    Ok(())
}

fn decode_file(
    input: &PathBuf,
    output: &PathBuf,
    length: u64,
    packet_size: usize,
    systematic: bool,
) -> Result<()> {
    let k = (length as usize).div_ceil(packet_size).max(1);
    let config = Config {
        packet_size,
        systematic,
        distribution: Distribution::Robust,
        ..Config::default()
    };

    let mut reader = BufReader::new(
        File::open(input).with_context(|| format!("opening {}", input.display()))?,
    );
    let mut symbols = Vec::new();
    while let Some(symbol) = read_symbol(&mut reader, packet_size)? {
        symbols.push(symbol);
    }
    println!("Read {} symbols, K={k}", symbols.len());

    let decoder = Decoder::new(k, config).context("building decoder")?;
    let outcome = decoder.decode(symbols)?;
    println!("Solved {}/{} blocks", outcome.solved, k);
    if !outcome.is_complete() {
        bail!("decode incomplete: only {}/{} blocks recovered", outcome.solved, k);
    }

    let mut out = File::create(output).with_context(|| format!("creating {}", output.display()))?;
    let mut remaining = length;
    for block in outcome.blocks {
        let block = block.expect("checked complete above");
        let take = remaining.min(block.len() as u64) as usize;
        out.write_all(&block[..take])?;
        remaining -= take as u64;
    }
    println!("Wrote {length} bytes to {}", output.display());
    Ok(())
}

fn write_symbol(w: &mut impl Write, symbol: &Symbol) -> Result<()> {
    w.write_all(&symbol.index.to_le_bytes())?;
    w.write_all(&(symbol.degree as u32).to_le_bytes())?;
    w.write_all(&symbol.data)?;
    Ok(())
}

fn read_symbol(r: &mut impl Read, packet_size: usize) -> Result<Option<Symbol>> {
    let mut index_buf = [0u8; 8];
    match r.read_exact(&mut index_buf) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    }
    let mut degree_buf = [0u8; 4];
    r.read_exact(&mut degree_buf)?;
    let mut data = vec![0u8; packet_size];
    r.read_exact(&mut data)?;

    let index = u64::from_le_bytes(index_buf);
    let degree = u32::from_le_bytes(degree_buf) as usize;
    Ok(Some(Symbol::new(index, degree, data.into())))
}
