//! `fast-cksum`: a `cksum` compatible checksum tool with ledger support.
//!
//! - `sum [FILE...]` prints `<crc> <bytes> <name>` per file (stdin without a file).
//! - `cat -c LEDGER FILE...` echoes files to stdout while verifying them.
//! - `store FILE` copies stdin into FILE and prints its ledger line.
//! - `merge [--delete] LEDGER...` prints the merged, name-sorted ledger.
//!
//! Logging goes to stderr; set `FAST_CKSUM_LOG` (e.g. `debug`) to see more.

use std::{
  env,
  fs::{self, File},
  io::{self, BufWriter, Read, Write},
  process::ExitCode,
};

use anyhow::{Context, Result};
use fast_cksum::{
  Checksum, Cksum,
  ledger::{Ledger, LedgerEntry},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Read buffer size (64 KiB).
const BUF_SIZE: usize = 64 << 10;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Command {
  Sum { files: Vec<String> },
  Cat { ledger: String, files: Vec<String> },
  Store { file: String },
  Merge { delete: bool, ledgers: Vec<String> },
  Help,
}

fn parse_args(mut it: impl Iterator<Item = String>) -> Result<Command, String> {
  let Some(sub) = it.next() else {
    return Err("missing command".to_owned());
  };
  match sub.as_str() {
    "--help" | "-h" | "help" => Ok(Command::Help),
    "sum" => Ok(Command::Sum { files: it.collect() }),
    "cat" => {
      let mut ledger = None;
      let mut files = Vec::new();
      while let Some(arg) = it.next() {
        if arg == "-c" {
          if ledger.is_some() {
            return Err("-c may only be given once".to_owned());
          }
          let Some(value) = it.next() else {
            return Err("-c requires a ledger file".to_owned());
          };
          ledger = Some(value);
        } else {
          files.push(arg);
        }
      }
      let Some(ledger) = ledger else {
        return Err("cat requires -c LEDGER".to_owned());
      };
      if files.is_empty() {
        return Err("cat requires at least one file".to_owned());
      }
      Ok(Command::Cat { ledger, files })
    }
    "store" => match (it.next(), it.next()) {
      (Some(file), None) => Ok(Command::Store { file }),
      _ => Err("store takes exactly one file".to_owned()),
    },
    "merge" => {
      let mut delete = false;
      let mut ledgers = Vec::new();
      for arg in it {
        match arg.as_str() {
          "--delete" => delete = true,
          _ => ledgers.push(arg),
        }
      }
      if ledgers.is_empty() {
        return Err("merge requires at least one ledger".to_owned());
      }
      Ok(Command::Merge { delete, ledgers })
    }
    other => Err(format!("unknown command: {other}")),
  }
}

fn print_help() {
  eprintln!(
    "\
fast-cksum: POSIX cksum compatible checksums

USAGE:
  fast-cksum sum [FILE...]
  fast-cksum cat -c LEDGER FILE...
  generate_data | fast-cksum store FILE [>> LEDGER]
  fast-cksum merge [--delete] LEDGER...

ENVIRONMENT:
  FAST_CKSUM_LOG       log filter for stderr (default: warn)
  FAST_CKSUM_FORCE     auto | bytewise | slice16 | slice16-prefetch | slice32 | slice32-prefetch
"
  );
}

/// Copy `reader` into `writer` through a 64 KiB buffer.
fn pump<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> io::Result<u64> {
  let mut buf = vec![0u8; BUF_SIZE];
  let mut total = 0u64;
  loop {
    match reader.read(&mut buf) {
      Ok(0) => return Ok(total),
      Ok(n) => {
        writer.write_all(&buf[..n])?;
        total += n as u64;
      }
      Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
      Err(e) => return Err(e),
    }
  }
}

/// Checksum everything `reader` yields.
fn checksum_reader<R: Read>(reader: R, name: &str) -> Result<LedgerEntry> {
  let mut reader = Cksum::reader(reader);
  pump(&mut reader, &mut io::sink()).with_context(|| format!("reading {name:?}"))?;
  let entry = reader.hasher().record(name);
  debug!(name, bytes = entry.len, crc = entry.crc, "checksummed");
  Ok(entry)
}

fn sum(files: &[String]) -> Result<()> {
  let mut out = io::stdout().lock();
  if files.is_empty() {
    let entry = checksum_reader(io::stdin().lock(), "")?;
    writeln!(out, "{entry}")?;
    return Ok(());
  }
  for name in files {
    let file = File::open(name).with_context(|| format!("cannot open {name:?}"))?;
    let entry = checksum_reader(file, name)?;
    writeln!(out, "{entry}")?;
  }
  Ok(())
}

fn cat(ledger_path: &str, files: &[String]) -> Result<()> {
  let ledger = Ledger::from_path(ledger_path).with_context(|| format!("loading ledger {ledger_path:?}"))?;

  // Refuse to start output unless every file can be verified.
  for name in files {
    if !ledger.contains(name) {
      anyhow::bail!("{name:?} not found in ledger {ledger_path:?}");
    }
  }

  let mut out = BufWriter::with_capacity(BUF_SIZE, io::stdout().lock());
  for name in files {
    let file = File::open(name).with_context(|| format!("cannot open {name:?}"))?;
    let mut reader = Cksum::reader(file);
    pump(&mut reader, &mut out).with_context(|| format!("copying {name:?} to stdout"))?;
    let hasher = reader.hasher();
    ledger
      .verify(name, hasher.finalize(), hasher.len())
      .with_context(|| format!("verifying against ledger {ledger_path:?}"))?;
    debug!(name, bytes = hasher.len(), "verified");
  }
  out.flush()?;
  info!(files = files.len(), ledger = ledger_path, "all files verified");
  Ok(())
}

fn store(path: &str) -> Result<()> {
  let file = File::create(path).with_context(|| format!("cannot create {path:?}"))?;
  let mut writer = Cksum::writer(BufWriter::with_capacity(BUF_SIZE, file));
  pump(&mut io::stdin().lock(), &mut writer).with_context(|| format!("writing {path:?}"))?;
  writer.flush().with_context(|| format!("writing {path:?}"))?;

  let entry = writer.hasher().record(path);
  debug!(name = path, bytes = entry.len, crc = entry.crc, "stored");
  writeln!(io::stdout().lock(), "{entry}")?;
  Ok(())
}

fn merge(paths: &[String], delete: bool) -> Result<()> {
  let mut merged = Ledger::new();
  for path in paths {
    let ledger = Ledger::from_path(path).with_context(|| format!("loading ledger {path:?}"))?;
    merged.merge(ledger).with_context(|| format!("merging {path:?}"))?;
  }

  let mut out = BufWriter::new(io::stdout().lock());
  merged.write_to(&mut out)?;
  out.flush()?;
  info!(entries = merged.len(), inputs = paths.len(), "merged ledgers");

  if delete {
    for path in paths {
      fs::remove_file(path).with_context(|| format!("deleting {path:?}"))?;
    }
  }
  Ok(())
}

fn init_logging() {
  let filter = EnvFilter::try_from_env("FAST_CKSUM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .init();
}

fn run(cmd: Command) -> Result<()> {
  debug!(kernel = fast_cksum::backend_name(), "starting");
  match cmd {
    Command::Help => {
      print_help();
      Ok(())
    }
    Command::Sum { files } => sum(&files),
    Command::Cat { ledger, files } => cat(&ledger, &files),
    Command::Store { file } => store(&file),
    Command::Merge { delete, ledgers } => merge(&ledgers, delete),
  }
}

fn main() -> ExitCode {
  init_logging();

  let cmd = match parse_args(env::args().skip(1)) {
    Ok(cmd) => cmd,
    Err(msg) => {
      eprintln!("fast-cksum: {msg}\n");
      print_help();
      return ExitCode::from(2);
    }
  };

  match run(cmd) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("fast-cksum: {err:#}");
      ExitCode::FAILURE
    }
  }
}
