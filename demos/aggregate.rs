use chained_result::{AggregateResultBuilder, Error, Result};

fn delete_user(id: u32) -> Result {
    match id {
        0 => Result::from_error(Error::argument_invalid("id", "must be non-zero")),
        id if id > 100 => {
            Result::from_error(Error::not_found().with_message(format!("no user {}", id)))
        }
        _ => Result::success(),
    }
}

fn main() {
    let mut builder = AggregateResultBuilder::new();
    for id in [1, 0, 7, 512] {
        builder.add(delete_user(id));
    }

    let result = builder.build();
    println!(
        "{} succeeded, {} failed",
        result.successful_results().count(),
        result.failed_results().count()
    );
    println!("{}", result);
}
