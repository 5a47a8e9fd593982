//! Scene-level tests exercising the host callbacks end to end
