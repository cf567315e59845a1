#![no_main]

use libfuzzer_sys::fuzz_target;
use testament_ledger::Ledger;

fuzz_target!(|data: &[u8]| {
    // Materialize a ledger from arbitrary bytes. from_bytes must never
    // panic — the worst case is an empty ledger.
    let ledger = Ledger::from_bytes(data);

    // Whatever materialized must survive a serialize/reload round-trip.
    let bytes = ledger.to_bytes().expect("ledger must re-serialize");
    assert_eq!(Ledger::from_bytes(&bytes), ledger);
});
