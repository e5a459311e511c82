use super::{streaming_types::*, units::DataRate};
use crate::error::Result;

// AdaptationControllerInterface is implemented by bitrate adaptation
// controllers. A controller is fed the four call-ins of a segmented streaming
// session and answers, for every segment, which encoding rate to fetch.
// Controllers do not guarantee thread safety; the call-ins must be delivered
// in order and never concurrently for the same session.
pub trait AdaptationControllerInterface {
    // Called when the manifest request is about to be sent.
    fn on_manifest_request(&mut self, event: ManifestRequest);
    // Called when the manifest has been downloaded and parsed.
    fn on_manifest_response(&mut self, event: ManifestResponse) -> Result<()>;
    // Called before a segment request is sent. Returns the quality level the
    // request must be annotated with. May block to pace requests.
    fn on_segment_request(&mut self, event: SegmentRequest) -> Result<DataRate>;
    // Called when the segment requested last has been downloaded.
    fn on_segment_response(&mut self) -> Result<()>;
}
