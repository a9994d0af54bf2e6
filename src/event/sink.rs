//! Sink capabilities
//!
//! Any `Write` can be an encoder sink. Sinks that can push buffered bytes to
//! a durable medium also implement `Durable`, and the caller opts in to it
//! with `Encoder::durable`.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Stdout, StdoutLock, Write};
use std::path::Path;

/// A sink that can force written data to stable storage
pub trait Durable: Write {
    fn sync(&mut self) -> io::Result<()>;
}

impl Durable for File {
    fn sync(&mut self) -> io::Result<()> {
        self.sync_all()
    }
}

impl<W: Durable> Durable for BufWriter<W> {
    fn sync(&mut self) -> io::Result<()> {
        self.flush()?;
        self.get_mut().sync()
    }
}

impl Durable for Stdout {
    fn sync(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl Durable for StdoutLock<'_> {
    fn sync(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl Durable for Vec<u8> {
    fn sync(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<D: Durable + ?Sized> Durable for &mut D {
    fn sync(&mut self) -> io::Result<()> {
        (**self).sync()
    }
}

impl<D: Durable + ?Sized> Durable for Box<D> {
    fn sync(&mut self) -> io::Result<()> {
        (**self).sync()
    }
}

/// Open a file for appending records, creating it and its parent directory
pub fn open_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_vec_sync_is_noop() {
        let mut buf = b"abc".to_vec();
        buf.sync().unwrap();
        assert_eq!(buf, b"abc");
    }

    #[test]
    fn test_open_append_creates_parent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("events.jsonl");

        let mut file = open_append(&path).unwrap();
        file.write_all(b"one").unwrap();
        file.sync().unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"one");
    }

    #[test]
    fn test_open_append_keeps_existing_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("events.jsonl");
        fs::write(&path, b"first").unwrap();

        let mut file = open_append(&path).unwrap();
        file.write_all(b"second").unwrap();
        file.sync().unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"firstsecond");
    }

    #[test]
    fn test_bufwriter_sync_flushes_through() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("buffered.jsonl");

        let mut writer = BufWriter::new(open_append(&path).unwrap());
        writer.write_all(b"buffered").unwrap();
        assert!(fs::read(&path).unwrap().is_empty());

        writer.sync().unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"buffered");
    }

    #[test]
    fn test_boxed_sink_forwards_sync() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("boxed.jsonl");

        let mut sink: Box<dyn Durable> = Box::new(BufWriter::new(open_append(&path).unwrap()));
        sink.write_all(b"boxed").unwrap();
        sink.sync().unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"boxed");
    }
}
