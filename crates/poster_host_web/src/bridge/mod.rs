//! Browser capability bridge for `poster_host_web` service adapters.

mod interop;

pub use interop::{
    alert, create_object_url, has_dialogs, has_launch_queue, has_object_urls,
    install_launch_consumer, location_hash, revoke_object_url, set_location_hash,
};
