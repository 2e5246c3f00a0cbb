use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{HexitchError, Result};

enum Backing {
    File(File),
    Memory(Vec<u8>),
}

/// Read-only view of the bytes being browsed.
///
/// Reads are always made by absolute address; the file position left behind
/// by one read is never relied upon by the next one.
pub struct AddressSpace {
    path: Option<PathBuf>,
    backing: Backing,
    total_size: u64,
}

/// The bytes returned by [`AddressSpace::read`].
///
/// A window remembers how many bytes were asked for, so positions past the
/// end of the file read as `None` instead of a silent zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    base: u64,
    data: Vec<u8>,
    requested: usize,
}

impl Window {
    pub fn base(&self) -> u64 {
        self.base
    }

    /// Bytes that actually exist in the file.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Byte at `offset` from the window base; `None` past end-of-file.
    pub fn get(&self, offset: usize) -> Option<u8> {
        self.data.get(offset).copied()
    }

    pub fn is_short(&self) -> bool {
        self.data.len() < self.requested
    }
}

impl AddressSpace {
    pub fn open(path: impl AsRef<Path>) -> Result<AddressSpace> {
        let path = path.as_ref();
        let unavailable = |source| HexitchError::FileUnavailable {
            path: path.to_owned(),
            source,
        };
        let file = File::open(path).map_err(unavailable)?;
        let total_size = file.metadata().map_err(unavailable)?.len();

        debug!(path = %path.display(), size = total_size, "opened file for viewing");

        Ok(AddressSpace {
            path: Some(path.to_owned()),
            backing: Backing::File(file),
            total_size,
        })
    }

    pub fn from_bytes(data: Vec<u8>) -> AddressSpace {
        AddressSpace {
            path: None,
            total_size: data.len() as u64,
            backing: Backing::Memory(data),
        }
    }

    pub fn size(&self) -> u64 {
        self.total_size
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn name(&self) -> String {
        if let Some(path) = &self.path {
            format!("{}", path.display())
        } else {
            "*memory*".to_string()
        }
    }

    /// Reads up to `length` bytes starting at `address`.
    ///
    /// The result is short only when the range crosses the end of the file.
    pub fn read(&self, address: u64, length: usize) -> Result<Window> {
        let available = self.total_size.saturating_sub(address);
        let wanted = std::cmp::min(length as u64, available) as usize;

        let data = match &self.backing {
            Backing::Memory(bytes) => {
                let start = address.min(self.total_size) as usize;
                bytes[start..start + wanted].to_vec()
            }
            Backing::File(file) => read_file_at(file, address, wanted)?,
        };

        trace!(address, length, got = data.len(), "read");

        Ok(Window {
            base: address,
            data,
            requested: length,
        })
    }
}

fn read_file_at(mut file: &File, address: u64, wanted: usize) -> Result<Vec<u8>> {
    let read_error = |source| HexitchError::Read { address, source };
    let mut data = vec![0; wanted];
    if wanted == 0 {
        return Ok(data);
    }

    file.seek(SeekFrom::Start(address)).map_err(read_error)?;

    let mut filled = 0;
    while filled < wanted {
        match file.read(&mut data[filled..]) {
            Ok(0) => break, // file shrank under us
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(read_error(e)),
        }
    }
    data.truncate(filled);
    Ok(data)
}

/// Parses an address typed by the user.
///
/// `0x1000`, `1000h` and plain `1000` are hexadecimal; `#4096` is decimal.
pub fn parse_address(text: &str) -> Result<u64> {
    let trimmed = text.trim();
    let invalid = || HexitchError::InvalidAddress(text.to_string());

    let parsed = if let Some(decimal) = trimmed.strip_prefix('#') {
        decimal.parse::<u64>()
    } else if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16)
    } else if let Some(hex) = trimmed
        .strip_suffix('h')
        .or_else(|| trimmed.strip_suffix('H'))
    {
        u64::from_str_radix(hex, 16)
    } else {
        u64::from_str_radix(trimmed, 16)
    };

    parsed.map_err(|_| invalid())
}
