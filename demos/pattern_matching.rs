use chained_result::{Error, Result};

fn maybe_int(fail: bool) -> Result<u32> {
    if fail {
        return Result::from_error(Error::argument_invalid("fail", "was set"));
    }
    Result::from_success(42)
}

fn main() {
    for fail in [false, true] {
        let (result, inner) = maybe_int(fail).unpack();
        match result {
            Ok(i) => println!("Got int: {}", i),
            Err(Error::ArgumentInvalid { name, message }) => {
                println!("Bad argument `{}`: {}", name, message)
            }
            Err(other) => println!("Error: {}", other),
        }

        if let Some(inner) = inner {
            println!("\nCaused by: {}", inner);
        }
    }
}
