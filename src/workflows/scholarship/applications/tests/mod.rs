mod common;
mod ledger;
mod transitions;
