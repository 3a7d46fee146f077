// Copyright 2026 Daniel Smith
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Byte sources and byte classification.

use std::io::{self, Read};

use crate::term::Descriptor;

pub const NUL: u8 = 0x00;
pub const ETX: u8 = 0x03;
pub const BS: u8 = 0x08;
pub const LF: u8 = 0x0A;
pub const CR: u8 = 0x0D;
pub const DEL: u8 = 0x7F;

/// How the acquisition loop treats one input byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteClass {
    Ordinary,
    Erase,     // backspace or delete
    LineEnd,   // CR or LF
    Interrupt, // ETX (Ctrl-C)
    Ignore,    // NUL
}

impl ByteClass {
    pub fn of(b: u8) -> ByteClass {
        match b {
            BS | DEL => ByteClass::Erase,
            CR | LF => ByteClass::LineEnd,
            ETX => ByteClass::Interrupt,
            NUL => ByteClass::Ignore,
            _ => ByteClass::Ordinary,
        }
    }
}

/// Where secret bytes come from.
///
/// `read_byte` blocks until exactly one byte is available.  End-of-stream is
/// an error of kind [`io::ErrorKind::UnexpectedEof`], never a zero byte.
pub trait ByteSource {
    /// Descriptor used for terminal detection and mode control.  `None`
    /// means the source is never treated as a terminal.
    fn descriptor(&self) -> Option<Descriptor>;

    fn read_byte(&mut self) -> io::Result<u8>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn descriptor(&self) -> Option<Descriptor> {
        (**self).descriptor()
    }

    fn read_byte(&mut self) -> io::Result<u8> {
        (**self).read_byte()
    }
}

fn eof() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "EOF")
}

/// Pull a single byte out of a reader, retrying on EINTR.
fn read_one(reader: &mut impl Read) -> io::Result<u8> {
    let mut buf = [0u8; 1];
    loop {
        match reader.read(&mut buf) {
            Ok(1) => return Ok(buf[0]),
            Ok(_) => return Err(eof()),
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Process standard input, read unbuffered so that anything after the line
/// terminator is left for the next reader.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stdin;

#[cfg(unix)]
impl ByteSource for Stdin {
    fn descriptor(&self) -> Option<Descriptor> {
        Some(libc::STDIN_FILENO)
    }

    fn read_byte(&mut self) -> io::Result<u8> {
        read_byte(libc::STDIN_FILENO)
    }
}

#[cfg(not(unix))]
impl ByteSource for Stdin {
    fn descriptor(&self) -> Option<Descriptor> {
        None
    }

    fn read_byte(&mut self) -> io::Result<u8> {
        read_one(&mut io::stdin().lock())
    }
}

/// Read exactly one byte from `fd` with read(2).
#[cfg(unix)]
pub fn read_byte(fd: Descriptor) -> io::Result<u8> {
    let mut buf = [0u8; 1];
    loop {
        let n = unsafe { libc::read(fd, buf.as_mut_ptr() as *mut libc::c_void, 1) };
        if n == 1 {
            return Ok(buf[0]);
        }
        if n == 0 {
            return Err(eof());
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

/// Any readable handle that also has a descriptor: an opened `/dev/tty`,
/// a `File`, one end of a socket pair.
#[cfg(unix)]
pub struct FdSource<T> {
    inner: T,
}

#[cfg(unix)]
impl<T: Read + std::os::unix::io::AsRawFd> FdSource<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(unix)]
impl<T: Read + std::os::unix::io::AsRawFd> ByteSource for FdSource<T> {
    fn descriptor(&self) -> Option<Descriptor> {
        Some(self.inner.as_raw_fd())
    }

    fn read_byte(&mut self) -> io::Result<u8> {
        read_one(&mut self.inner)
    }
}

/// Any reader without a descriptor.  Never a terminal, so no mode changes
/// are attempted; the usual choice for tests and piped input.
pub struct ReaderSource<R> {
    inner: R,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn descriptor(&self) -> Option<Descriptor> {
        None
    }

    fn read_byte(&mut self) -> io::Result<u8> {
        read_one(&mut self.inner)
    }
}
