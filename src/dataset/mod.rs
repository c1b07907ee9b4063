pub mod reader;
pub mod types;
pub mod writer;

pub use reader::{
    find_household, load_households, parse_amount, read_households, DatasetError, LookupError,
    AMOUNT_SCALE,
};
pub use types::Household;
pub use writer::{save_ranked_csv, write_ranked_csv, OUTPUT_HEADER};
