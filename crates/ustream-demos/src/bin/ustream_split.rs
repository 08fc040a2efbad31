//! Builds two in-memory ustreams and joins them with [`concat`], then reads
//! the result end to end, crossing the join transparently.

use ustream_core::{concat, from_owned, from_static, UStreamError};

const USER_BUFFER_SIZE: usize = 5;

fn print_stream(stream: &mut ustream_core::Instance) {
    println!("\r\n------printing the ustream------");
    let mut buf = [0u8; USER_BUFFER_SIZE];
    loop {
        match stream.read(&mut buf) {
            Ok(n) => print!("{}", String::from_utf8_lossy(&buf[..n])),
            Err(UStreamError::Eof) => break,
            Err(e) => {
                eprintln!("read failed: {e}");
                return;
            }
        }
    }
    println!("\r\n-----------end of ustream------------\r\n");
}

fn main() {
    let one = from_static(b"Split Before ");
    println!("size of first stream: {}", one.get_remaining_size());

    let two = from_owned(b"Split After".to_vec());
    println!("size of second stream: {}", two.get_remaining_size());

    let mut joined = match concat(one, &two) {
        Ok(joined) => joined,
        Err(e) => {
            eprintln!("could not concat streams: {e}");
            return;
        }
    };
    println!("size of joined stream: {}", joined.get_remaining_size());

    print_stream(&mut joined);
}
