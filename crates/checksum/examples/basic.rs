//! Basic cksum usage: one-shot, register threading, hasher and ledgers.
//!
//! Run with: `cargo run --example basic -p fast-cksum`

use std::io::{self, Read};

use fast_cksum::{
  Checksum, Cksum, Kernel, Options, SEED, finalize, full,
  ledger::{Ledger, LedgerEntry},
  partial,
};

fn main() -> io::Result<()> {
  println!("=== fast-cksum Basic Examples ===\n");

  one_shot_examples();
  register_example();
  hasher_example()?;
  ledger_example();
  Ok(())
}

/// One-shot computation: the same number `cksum(1)` prints.
fn one_shot_examples() {
  println!("--- One-Shot Computation ---\n");

  let crc = full(b"123456789");
  println!("cksum(\"123456789\")  = {crc}");
  assert_eq!(crc, 930_766_865);

  let crc = full(b"hello\n");
  println!("cksum(\"hello\\n\")    = {crc}");
  assert_eq!(crc, 3_015_617_425);

  // Every kernel agrees; pick one explicitly when benchmarking or testing.
  let data = vec![0xA5u8; 100_000];
  for kernel in Kernel::ALL {
    println!("  {:<28} {}", kernel.name(), kernel.full(&data, Options::default()));
  }
  println!("auto pick for 100000 B: {}", fast_cksum::kernel_name_for_len(data.len()));

  println!();
}

/// Thread the register through `partial`, then fold in the length once.
fn register_example() {
  println!("--- Register Threading ---\n");

  let mut reg = SEED;
  let mut total = 0u64;
  for chunk in [&b"first part of data"[..], b" and the second part"] {
    reg = partial(chunk, reg);
    total += chunk.len() as u64;
    println!("after {total:>2} bytes: register 0x{reg:08X}");
  }

  let crc = finalize(total, reg);
  println!("finalized: {crc}");
  assert_eq!(crc, full(b"first part of data and the second part"));

  println!();
}

/// The hasher tracks the length, and its reader adapter checksums a stream.
fn hasher_example() -> io::Result<()> {
  println!("--- Streaming Hasher ---\n");

  let mut hasher = Cksum::new();
  hasher.update(b"1234");
  hasher.update(b"56789");
  println!("hasher: {} over {} bytes", hasher.finalize(), hasher.len());
  assert_eq!(hasher.finalize(), 930_766_865);

  // Save the register and length, continue later.
  let mut resumed = Cksum::resume(hasher.register(), hasher.len());
  resumed.update(b"\n");
  assert_eq!(resumed.finalize(), full(b"123456789\n"));

  let mut reader = Cksum::reader(io::Cursor::new(b"hello\n".to_vec()));
  let mut sink = Vec::new();
  reader.read_to_end(&mut sink)?;
  println!("reader: {} over {} bytes", reader.crc(), sink.len());

  println!();
  Ok(())
}

/// Build a ledger of `<crc> <len> <name>` lines and verify against it.
fn ledger_example() {
  println!("--- Ledger ---\n");

  let mut ledger = Ledger::new();
  for (name, body) in [("a.txt", &b"alpha\n"[..]), ("b.txt", b"beta\n")] {
    let mut h = Cksum::new();
    h.update(body);
    if let Err(err) = ledger.insert(h.record(name)) {
      println!("insert failed: {err}");
    }
  }
  for entry in ledger.iter() {
    println!("{entry}");
  }

  match ledger.verify("a.txt", full(b"alpha\n"), 6) {
    Ok(()) => println!("a.txt verified"),
    Err(err) => println!("a.txt: {err}"),
  }
  if let Err(err) = ledger.verify("b.txt", full(b"BETA\n"), 5) {
    println!("b.txt: {err}");
  }

  let line = LedgerEntry::new(full(b""), 0, "empty").to_string();
  println!("empty file line: {line}");

  println!();
}
