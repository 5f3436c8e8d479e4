//! Session state: orientation, turn ownership, selection and the
//! top-level game session.

pub mod end;
pub mod orientation;
pub mod selection;
pub mod session;
pub mod turn;
