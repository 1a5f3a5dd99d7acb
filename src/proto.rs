//! Generated decoder types for the external schema registry's wire format.
//! See `proto/atlas.proto`; this module is a thin `include!` of the
//! `prost-build` output and is never hand-edited.

include!(concat!(env!("OUT_DIR"), "/atlas.rs"));
