// Domain layer modules
pub mod attribute;
pub mod change_filter;
pub mod change_record;
pub mod image_validator;
pub mod outbound_message;

// Re-exports
pub use attribute::{AttributeRef, AttributeType, get_value};
pub use change_filter::{AcceptedChange, ChangeFilter, DYNAMODB_EVENT_SOURCE, SkipReason};
pub use change_record::{ChangeImages, ChangeRecord};
pub use image_validator::{MissingField, RequiredFields, validate_new_image};
pub use outbound_message::{MessageAttribute, OutboundMessage};
