//! Heuristic face-presence check for captured still frames.
//!
//! Layers follow the usual split: `domain` modules hold value types and the
//! traits other layers plug into, `infrastructure` modules hold concrete
//! implementations, and `pipeline` wires them into use cases.

pub mod capture {
    pub mod domain {
        pub mod capture_device;
        pub mod capture_session;
    }
    pub mod infrastructure;
}

pub mod detection {
    pub mod domain {
        pub mod detection_result;
        pub mod heuristic_thresholds;
        pub mod presence_detector;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod batch_presence_checker;
    pub mod check_presence_use_case;
}

pub mod shared {
    pub mod constants;
    pub mod frame;
    pub mod settings;
}
