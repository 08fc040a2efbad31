//! Builds a forward stream and flushes it to a sink closure, with no
//! intermediate copy into a caller-owned buffer.

const EXPECTED_CONTENT: &[u8] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

fn main() {
    let mut stream = ustream_forward::from_owned(EXPECTED_CONTENT.to_vec());
    println!("size of forward stream: {}", stream.get_remaining_size());

    let mut chunks = 0;
    let mut total = 0;
    let result = stream.flush(&mut |chunk| {
        chunks += 1;
        total += chunk.len();
        print!("{}", String::from_utf8_lossy(chunk));
        Ok(())
    });

    if let Err(e) = result {
        eprintln!("flush failed: {e}");
        return;
    }

    println!("\r\nflush pushed {total} bytes across {chunks} call(s)");
}
