use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// # ROM
/// A named image of raw Chip-8 machine code, loaded verbatim at `PROGRAM_START`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rom {
    pub name: String,
    pub data: Vec<u8>,
}

impl Rom {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Rom {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Read a rom from some source
    ///
    /// # Arguments
    /// * `name` what to call the rom
    /// * `reader` a reader that contains a ROM
    pub fn from_reader(name: impl Into<String>, reader: &mut dyn Read) -> io::Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(Rom::new(name, data))
    }

    /// Read a rom from a file, named after the file's stem
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mut reader = BufReader::new(File::open(path)?);
        Rom::from_reader(name, &mut reader)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
