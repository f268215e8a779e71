use std::collections::{HashMap, VecDeque};

use uuid::Uuid;

/// FIFO queue of pending requests with out-of-band responses.
///
/// The page reads the oldest request without popping it, so an unanswered
/// request stays visible until it is answered or withdrawn. Responses are
/// claimed exactly once.
#[derive(Debug)]
pub(crate) struct RequestQueue<Req, Resp> {
    requests: VecDeque<(Uuid, Req)>,
    responses: HashMap<Uuid, Resp>,
}

impl<Req, Resp> RequestQueue<Req, Resp> {
    pub fn new() -> Self {
        Self { requests: VecDeque::new(), responses: HashMap::new() }
    }

    pub fn add_request(&mut self, id: Uuid, request: Req) {
        self.requests.push_back((id, request));
    }

    pub fn read_request(&self) -> Option<&Req> {
        self.requests.front().map(|(_, request)| request)
    }

    pub fn has_request(&self, id: &Uuid) -> bool {
        self.requests.iter().any(|(request_id, _)| request_id == id)
    }

    pub fn remove_request(&mut self, id: &Uuid) {
        self.requests.retain(|(request_id, _)| request_id != id);
    }

    pub fn add_response(&mut self, id: Uuid, response: Resp) {
        self.responses.insert(id, response);
    }

    pub fn get_response(&mut self, id: &Uuid) -> Option<Resp> {
        self.responses.remove(id)
    }
}
