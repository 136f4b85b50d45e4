//! Opcode rewriting ahead of decoding
//!
//! Trained models keep `ortho_context` in a `collections.defaultdict`, which
//! is pickled as a class reference, a REDUCE call and SETITEMS. The decoder
//! only knows how to turn `copy_reg._reconstructor` into an empty dict, so
//! references to the dict subclasses of `collections` are rewritten to that
//! global and the following SETITEMS fill a plain dict.
//!
//! FRAME opcodes are dropped because rewriting changes frame lengths. The
//! decoder ignores frames anyway. Anything this pass does not understand
//! (unknown opcodes, truncated arguments) is passed through unchanged so
//! that the decoder reports it.

use std::collections::HashMap;

// Opcodes without arguments
const MARK: u8 = b'(';
const STOP: u8 = b'.';
const POP: u8 = b'0';
const POP_MARK: u8 = b'1';
const DUP: u8 = b'2';
const NONE: u8 = b'N';
const APPEND: u8 = b'a';
const APPENDS: u8 = b'e';
const BUILD: u8 = b'b';
const DICT: u8 = b'd';
const EMPTY_DICT: u8 = b'}';
const LIST: u8 = b'l';
const EMPTY_LIST: u8 = b']';
const SETITEM: u8 = b's';
const SETITEMS: u8 = b'u';
const TUPLE: u8 = b't';
const EMPTY_TUPLE: u8 = b')';
const REDUCE: u8 = b'R';
const OBJ: u8 = b'o';
const BINPERSID: u8 = b'Q';
const NEWOBJ: u8 = 0x81;
const TUPLE1: u8 = 0x85;
const TUPLE2: u8 = 0x86;
const TUPLE3: u8 = 0x87;
const NEWTRUE: u8 = 0x88;
const NEWFALSE: u8 = 0x89;
const EMPTY_SET: u8 = 0x8f;
const ADDITEMS: u8 = 0x90;
const FROZENSET: u8 = 0x91;
const NEWOBJ_EX: u8 = 0x92;
const STACK_GLOBAL: u8 = 0x93;
const MEMOIZE: u8 = 0x94;
const NEXT_BUFFER: u8 = 0x97;
const READONLY_BUFFER: u8 = 0x98;

// Newline-terminated arguments
const INT: u8 = b'I';
const LONG: u8 = b'L';
const FLOAT: u8 = b'F';
const STRING: u8 = b'S';
const UNICODE: u8 = b'V';
const PERSID: u8 = b'P';
const PUT: u8 = b'p';
const GET: u8 = b'g';
const GLOBAL: u8 = b'c';
const INST: u8 = b'i';

// Fixed-size arguments
const BININT: u8 = b'J';
const BININT1: u8 = b'K';
const BININT2: u8 = b'M';
const BINFLOAT: u8 = b'G';
const BINPUT: u8 = b'q';
const LONG_BINPUT: u8 = b'r';
const BINGET: u8 = b'h';
const LONG_BINGET: u8 = b'j';
const PROTO: u8 = 0x80;
const EXT1: u8 = 0x82;
const EXT2: u8 = 0x83;
const EXT4: u8 = 0x84;
const FRAME: u8 = 0x95;

// Length-prefixed arguments
const SHORT_BINSTRING: u8 = b'U';
const SHORT_BINBYTES: u8 = b'C';
const SHORT_BINUNICODE: u8 = 0x8c;
const LONG1: u8 = 0x8a;
const BINSTRING: u8 = b'T';
const BINUNICODE: u8 = b'X';
const BINBYTES: u8 = b'B';
const LONG4: u8 = 0x8b;
const BINUNICODE8: u8 = 0x8d;
const BINBYTES8: u8 = 0x8e;
const BYTEARRAY8: u8 = 0x96;

/// `GLOBAL copy_reg _reconstructor`
const RECONSTRUCTOR: &[u8] = b"ccopy_reg\n_reconstructor\n";

/// Dict subclasses whose instances are read as plain dicts
const DICT_CLASSES: [(&[u8], &[u8]); 2] = [
    (b"collections", b"defaultdict"),
    (b"collections", b"OrderedDict"),
];

/// Rewrites a pickle stream so that `collections` dict subclasses decode as dicts
pub(super) fn normalize(input: &[u8]) -> Vec<u8> {
    let mut rewriter = Rewriter::new(input);
    rewriter.run();

    if rewriter.rewritten > 0 {
        tracing::debug!(
            classes = rewriter.rewritten,
            "Rewrote dict subclass references in pickle"
        );
    }

    rewriter.out
}

enum Step {
    Next,
    Stop,
}

struct Rewriter<'a> {
    input: &'a [u8],
    pos: usize,
    out: Vec<u8>,
    /// Strings pushed since the last opcode that was not a string push or memo access
    operands: Vec<&'a [u8]>,
    /// Memo slots, with the string stored in each when there is one
    memo: HashMap<u64, Option<&'a [u8]>>,
    rewritten: usize,
}

impl<'a> Rewriter<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            out: Vec::with_capacity(input.len()),
            operands: Vec::new(),
            memo: HashMap::new(),
            rewritten: 0,
        }
    }

    fn run(&mut self) {
        while self.pos < self.input.len() {
            let start = self.pos;
            match self.step(start) {
                Some(Step::Next) => {}
                Some(Step::Stop) => break,
                None => {
                    self.out.extend_from_slice(&self.input[start..]);
                    return;
                }
            }
        }
        // Trailing bytes after STOP are left for the decoder
        self.out.extend_from_slice(&self.input[self.pos..]);
    }

    /// Handles one opcode; `None` means the rest cannot be interpreted
    fn step(&mut self, start: usize) -> Option<Step> {
        let op = self.byte()?;

        match op {
            STOP => {
                self.out.push(op);
                return Some(Step::Stop);
            }
            FRAME => {
                self.take(8)?;
                return Some(Step::Next);
            }
            GLOBAL => {
                let module = trim_newline(self.line()?);
                let name = trim_newline(self.line()?);
                self.operands.clear();
                if is_dict_class(module, name) {
                    self.out.extend_from_slice(RECONSTRUCTOR);
                    self.rewritten += 1;
                    return Some(Step::Next);
                }
            }
            STACK_GLOBAL => {
                let class = match self.operands.as_slice() {
                    [.., module, name] => Some((*module, *name)),
                    _ => None,
                };
                self.operands.clear();
                if let Some((module, name)) = class {
                    if is_dict_class(module, name) {
                        self.out.extend_from_slice(&[POP, POP]);
                        self.out.extend_from_slice(RECONSTRUCTOR);
                        self.rewritten += 1;
                        return Some(Step::Next);
                    }
                }
            }
            SHORT_BINUNICODE | SHORT_BINSTRING => {
                let len = usize::from(self.byte()?);
                let text = self.take(len)?;
                self.operands.push(text);
            }
            BINUNICODE | BINSTRING => {
                let len = self.length(4)?;
                let text = self.take(len)?;
                self.operands.push(text);
            }
            BINUNICODE8 => {
                let len = self.length(8)?;
                let text = self.take(len)?;
                self.operands.push(text);
            }
            MEMOIZE => {
                let index = self.memo.len() as u64;
                self.remember(index);
            }
            PUT => {
                let index = decimal(self.line()?)?;
                self.remember(index);
            }
            BINPUT => {
                let index = self.uint(1)?;
                self.remember(index);
            }
            LONG_BINPUT => {
                let index = self.uint(4)?;
                self.remember(index);
            }
            GET => {
                let index = decimal(self.line()?)?;
                self.recall(index);
            }
            BINGET => {
                let index = self.uint(1)?;
                self.recall(index);
            }
            LONG_BINGET => {
                let index = self.uint(4)?;
                self.recall(index);
            }
            _ => {
                self.skip_argument(op)?;
                self.operands.clear();
            }
        }

        self.out.extend_from_slice(&self.input[start..self.pos]);
        Some(Step::Next)
    }

    fn skip_argument(&mut self, op: u8) -> Option<()> {
        match op {
            MARK | POP | POP_MARK | DUP | NONE | APPEND | APPENDS | BUILD | DICT | EMPTY_DICT
            | LIST | EMPTY_LIST | SETITEM | SETITEMS | TUPLE | EMPTY_TUPLE | REDUCE | OBJ
            | BINPERSID | NEWOBJ | TUPLE1 | TUPLE2 | TUPLE3 | NEWTRUE | NEWFALSE | EMPTY_SET
            | ADDITEMS | FROZENSET | NEWOBJ_EX | NEXT_BUFFER | READONLY_BUFFER => {}
            INT | LONG | FLOAT | STRING | UNICODE | PERSID => {
                self.line()?;
            }
            INST => {
                self.line()?;
                self.line()?;
            }
            BININT1 | PROTO | EXT1 => {
                self.take(1)?;
            }
            BININT2 | EXT2 => {
                self.take(2)?;
            }
            BININT | EXT4 => {
                self.take(4)?;
            }
            BINFLOAT => {
                self.take(8)?;
            }
            SHORT_BINBYTES | LONG1 => {
                let len = usize::from(self.byte()?);
                self.take(len)?;
            }
            BINBYTES | LONG4 => {
                let len = self.length(4)?;
                self.take(len)?;
            }
            BINBYTES8 | BYTEARRAY8 => {
                let len = self.length(8)?;
                self.take(len)?;
            }
            _ => return None,
        }
        Some(())
    }

    fn remember(&mut self, index: u64) {
        self.memo.insert(index, self.operands.last().copied());
    }

    fn recall(&mut self, index: u64) {
        match self.memo.get(&index) {
            Some(Some(text)) => self.operands.push(*text),
            _ => self.operands.clear(),
        }
    }

    fn byte(&mut self) -> Option<u8> {
        let byte = *self.input.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(len)?;
        let bytes = self.input.get(self.pos..end)?;
        self.pos = end;
        Some(bytes)
    }

    /// Reads up to and including the next newline
    fn line(&mut self) -> Option<&'a [u8]> {
        let len = self.input.get(self.pos..)?.iter().position(|&b| b == b'\n')?;
        self.take(len + 1)
    }

    /// Little-endian unsigned integer of `size` bytes
    fn uint(&mut self, size: usize) -> Option<u64> {
        let bytes = self.take(size)?;
        Some(
            bytes
                .iter()
                .rev()
                .fold(0u64, |acc, &b| (acc << 8) | u64::from(b)),
        )
    }

    fn length(&mut self, size: usize) -> Option<usize> {
        usize::try_from(self.uint(size)?).ok()
    }
}

fn is_dict_class(module: &[u8], name: &[u8]) -> bool {
    DICT_CLASSES
        .iter()
        .any(|(m, n)| *m == module && *n == name)
}

fn trim_newline(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\n").unwrap_or(line)
}

fn decimal(line: &[u8]) -> Option<u64> {
    std::str::from_utf8(line).ok()?.trim().parse().ok()
}
