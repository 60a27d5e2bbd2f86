use super::IDispatchEventRepo;
use crate::repos::shared::inmemory_repo::*;
use med_reminder_domain::DispatchEvent;

pub struct InMemoryDispatchEventRepo {
    events: std::sync::Mutex<Vec<DispatchEvent>>,
}

impl InMemoryDispatchEventRepo {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryDispatchEventRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IDispatchEventRepo for InMemoryDispatchEventRepo {
    async fn append(&self, event: &DispatchEvent) -> anyhow::Result<()> {
        insert(event, &self.events);
        Ok(())
    }

    async fn find_recent(&self, limit: usize) -> anyhow::Result<Vec<DispatchEvent>> {
        let mut events = find_by(&self.events, |_| true);
        events.sort_by(|e1, e2| e2.created_at.cmp(&e1.created_at));
        events.truncate(limit);
        Ok(events)
    }
}
