//! Data models for the stake vault program

pub mod instruction;
pub mod state;

pub use self::instruction::{
    InitializeAccounts, InitializeArgs, StakeAccounts, StakeArgs, UnstakeAccounts, UnstakeArgs,
    UpdatePoolAccounts, UpdatePoolArgs,
};
pub use self::state::MainStateInfo;
