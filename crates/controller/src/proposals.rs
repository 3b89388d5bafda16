//! Controller of the proposal inbox.
//!
//! Project managers see the proposals they sent and freelancers the ones
//! they received. The role decides who the chat counterpart is; accepting,
//! rejecting and cancelling work the same for both.

use tracing::{error, info};

use api_client::ApiClient;
use market_types::{ClientError, MemberId, ProjectId, Proposal, ProposalId, Session};

use crate::notice::{Notices, UiEffect};

/// Whose side of the proposals the signed-in user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    ProjectManager,
    Freelancer,
}

/// Which response the modal collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Accept,
    Reject,
}

/// The open response modal and the proposal it answers.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseModal {
    pub kind: ResponseKind,
    pub proposal: Proposal,
}

/// Who a chat about a proposal is opened with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTarget {
    pub freelancer_id: MemberId,
    pub receiver_id: MemberId,
    pub receiver_name: String,
    pub project_id: ProjectId,
    pub project_title: String,
}

pub struct ProposalInbox {
    api: ApiClient,
    session: Session,
    proposals: Vec<Proposal>,
    loading: bool,
    modal: Option<ResponseModal>,
    notices: Notices,
}

impl ProposalInbox {
    pub fn new(api: ApiClient, session: Session) -> Self {
        Self {
            api,
            session,
            proposals: Vec::new(),
            loading: false,
            modal: None,
            notices: Notices::default(),
        }
    }

    pub fn viewer(&self) -> Viewer {
        if self.session.is_freelancer() {
            Viewer::Freelancer
        } else {
            Viewer::ProjectManager
        }
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn modal(&self) -> Option<&ResponseModal> {
        self.modal.as_ref()
    }

    pub fn take_effects(&mut self) -> Vec<UiEffect> {
        self.notices.take()
    }

    /// Load the inbox of the signed-in user.
    pub async fn load(&mut self) {
        if !self.session.is_authenticated() {
            self.notices
                .report("Proposals", &ClientError::auth_required("view proposals"));
            return;
        }

        self.loading = true;
        let result = self.api.list_proposals().await;
        self.loading = false;

        match result {
            Ok(proposals) => {
                info!("Loaded {} proposals as {:?}", proposals.len(), self.viewer());
                self.proposals = proposals;
            }
            Err(err) => {
                error!("Loading proposals failed: {}", err);
                self.notices.report("Failed to load proposals", &err);
            }
        }
    }

    /// Open the accept modal. Unknown ids are ignored.
    pub fn open_accept(&mut self, id: ProposalId) -> bool {
        self.open_modal(id, ResponseKind::Accept)
    }

    /// Open the reject modal. Unknown ids are ignored.
    pub fn open_reject(&mut self, id: ProposalId) -> bool {
        self.open_modal(id, ResponseKind::Reject)
    }

    fn open_modal(&mut self, id: ProposalId, kind: ResponseKind) -> bool {
        match self.find(id) {
            Some(proposal) => {
                self.modal = Some(ResponseModal {
                    kind,
                    proposal: proposal.clone(),
                });
                true
            }
            None => false,
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Send the response collected by the open modal.
    ///
    /// On success the modal closes and the inbox reloads. On failure the
    /// modal stays open so the user can retry.
    pub async fn submit_modal(&mut self, message: &str, reason: Option<&str>) {
        let Some(modal) = self.modal.as_ref() else {
            return;
        };
        let id = modal.proposal.id;
        let kind = modal.kind;

        let (result, done) = match kind {
            ResponseKind::Accept => (
                self.api.accept_proposal(id, message).await,
                "Proposal accepted.",
            ),
            ResponseKind::Reject => (
                self.api.reject_proposal(id, message, reason).await,
                "Proposal rejected.",
            ),
        };

        match result {
            Ok(()) => {
                info!("Proposal {} answered: {:?}", id, kind);
                self.notices.alert(done);
                self.modal = None;
                self.load().await;
            }
            Err(err) => self.notices.report("Failed to answer proposal", &err),
        }
    }

    /// Withdraw a proposal. The caller asks for confirmation first.
    pub async fn cancel(&mut self, id: ProposalId) {
        if !self.session.is_authenticated() {
            self.notices
                .report("Proposals", &ClientError::auth_required("cancel proposals"));
            return;
        }

        match self.api.cancel_proposal(id).await {
            Ok(()) => {
                info!("Proposal {} cancelled", id);
                self.notices.alert("Proposal cancelled.");
                self.load().await;
            }
            Err(err) => self.notices.report("Failed to cancel proposal", &err),
        }
    }

    /// The other party of a proposal, as seen by the current viewer.
    pub fn chat_target(&self, id: ProposalId) -> Option<ChatTarget> {
        let proposal = self.find(id)?;
        let (receiver_id, receiver_name) = match self.viewer() {
            Viewer::ProjectManager => (proposal.freelancer_id, &proposal.freelancer_name),
            Viewer::Freelancer => (proposal.pm_id, &proposal.pm_name),
        };
        Some(ChatTarget {
            freelancer_id: proposal.freelancer_id,
            receiver_id,
            receiver_name: receiver_name.clone(),
            project_id: proposal.project_id,
            project_title: proposal.project_title.clone(),
        })
    }

    fn find(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.iter().find(|p| p.id == id)
    }
}
