mod court;
pub use self::court::{resolve, Court, CourtCategory, COURTS, TRIBUNALS};

mod decision;
pub use self::decision::{
    flatten_list, flatten_text, Catchwords, DecisionDetails, DecisionRecord, DecisionSummary,
    DecisionValues, FullValues, CSV_FIELDS,
};
