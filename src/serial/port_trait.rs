//! Trait abstraction for serial port operations to enable testing

use async_trait::async_trait;
use std::io;

/// Trait for serial port I/O operations
#[async_trait]
pub trait SerialPortIO: Send {
    /// Read available bytes into `buf`, returning how many arrived
    async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Write all data to the port
    async fn write_all(&mut self, data: &[u8]) -> io::Result<()>;

    /// Flush the output buffer
    async fn flush(&mut self) -> io::Result<()>;
}

#[cfg(test)]
pub mod mocks {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Scripted read result for the mock port
    pub enum MockRead {
        Bytes(Vec<u8>),
        Error(io::ErrorKind),
    }

    /// Mock serial port replaying a script of reads
    pub struct MockSerialPort {
        pub reads: Arc<Mutex<VecDeque<MockRead>>>,
        pub written_data: Arc<Mutex<Vec<Vec<u8>>>>,
    }

    impl MockSerialPort {
        pub fn new(reads: Vec<MockRead>) -> Self {
            Self {
                reads: Arc::new(Mutex::new(reads.into_iter().collect())),
                written_data: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn get_written_data(&self) -> Vec<Vec<u8>> {
            self.written_data.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SerialPortIO for MockSerialPort {
        async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let next = self.reads.lock().unwrap().pop_front();

            match next {
                Some(MockRead::Bytes(bytes)) => {
                    buf[..bytes.len()].copy_from_slice(&bytes);
                    Ok(bytes.len())
                }
                Some(MockRead::Error(kind)) => Err(io::Error::new(kind, "mock read error")),
                None => {
                    // Script exhausted: behave like a silent line
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(0)
                }
            }
        }

        async fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
            self.written_data.lock().unwrap().push(data.to_vec());
            Ok(())
        }

        async fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
