use chained_result::{Error, Result};

use std::fs::File;

fn file_size(path: &str) -> Result<u64> {
    // `std::result::Result<_, io::Error>` converts into a failed `Result` whose
    // error captures the io error.
    let size: Result<u64> = File::open(path)
        .and_then(|file| file.metadata())
        .map(|metadata| metadata.len())
        .into();

    if !size.is_success() {
        return size;
    }

    match size.into_entity() {
        Some(size) if size < 1024 => {
            let message = format!("File too small: {} bytes", size);
            Result::from_error(Error::invalid_operation().with_message(message))
        }
        Some(size) => Result::from_success(size),
        None => Result::from_error(Error::not_found()),
    }
}

fn maybe_file_size(path: &str) -> Result<u64> {
    let lucky = (path.len() % 2) == 0;
    if !lucky {
        return Result::from_error("Not this time!");
    }

    let size = file_size(path);
    if !size.is_success() {
        // Start a new failure whose cause is the one from `file_size`.
        return Result::from_failed(size);
    }
    size
}

fn main() {
    let result = maybe_file_size("foo.txt");
    if result.is_success() {
        let size = result.entity().copied().unwrap_or_default();
        println!("File size: {} KiB", size / 1024);
    } else {
        println!("Error: {}", result);
        println!("Root cause: {}", result.unwrap_error());
    }
}
