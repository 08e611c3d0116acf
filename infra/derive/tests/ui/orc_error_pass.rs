use orc_derive::orc_error;
use std::borrow::Cow;

#[orc_error]
pub enum SnapshotError {
    #[error("Snapshot read failed{}: {source}", format_context(.context))]
    Read { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Snapshot is saturated{}: {message}", format_context(.context))]
    Saturated { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal snapshot error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn load() -> Result<Vec<u8>, SnapshotError> {
    std::fs::read("registry.json").context("Loading registry snapshot")
}

fn main() {
    let _ = load();
    let internal: SnapshotError = "unexpected state".into();
    assert_eq!(internal.to_string(), "Internal snapshot error: unexpected state");

    let tagged: Result<(), SnapshotError> =
        Err(SnapshotError::Saturated { message: "46656 codes".into(), context: None });
    let err = tagged.context("allocating").unwrap_err();
    assert_eq!(err.to_string(), "Snapshot is saturated (allocating): 46656 codes");
}
