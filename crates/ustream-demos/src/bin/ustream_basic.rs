//! Builds an in-memory ustream and reads it to EOF in small chunks,
//! reporting how many `read` calls that took.

use ustream_core::{from_static, UStreamError};

const USER_BUFFER_SIZE: usize = 4;

fn main() {
    let mut stream = from_static(b"Hello World\r\n");
    println!("size of stream: {}", stream.get_remaining_size());

    println!("\r\n---printing the ustream---\r\n");
    let mut buf = [0u8; USER_BUFFER_SIZE];
    let mut reads = 0;
    loop {
        match stream.read(&mut buf) {
            Ok(n) => {
                print!("{}", String::from_utf8_lossy(&buf[..n]));
                reads += 1;
            }
            Err(UStreamError::Eof) => break,
            Err(e) => {
                eprintln!("read failed: {e}");
                return;
            }
        }
    }
    println!("\r\n-----------EOF------------");
    println!("read was called {reads} times");
}
