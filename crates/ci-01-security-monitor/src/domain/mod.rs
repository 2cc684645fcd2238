pub mod policy_store;
