//! Integration test host for the agentbridge workspace.
