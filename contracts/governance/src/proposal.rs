//! Proposal types, records and the pure execution decision.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::roles::{self, RoleId};

/// Kinds of privileged change a proposal can request.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ProposalType {
    AddRole = 1,
    RemoveRole = 2,
    AddWhitelist = 3,
    RemoveWhitelist = 4,
    Recovery = 5,
    AddDistributionWallet = 6,
    RemoveDistributionWallet = 7,
}

impl ProposalType {
    /// Role whose holders may create and approve proposals of this type.
    pub fn approver_role(&self, env: &Env) -> RoleId {
        match self {
            ProposalType::AddRole | ProposalType::RemoveRole | ProposalType::Recovery => {
                roles::admin_role(env)
            }
            ProposalType::AddWhitelist
            | ProposalType::RemoveWhitelist
            | ProposalType::AddDistributionWallet
            | ProposalType::RemoveDistributionWallet => roles::manager_role(env),
        }
    }
}

/// The effect a proposal applies once executed. Each variant carries only
/// the payload it needs.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    /// `(role, account)`
    AddRole(RoleId, Address),
    /// `(role, account)`
    RemoveRole(RoleId, Address),
    AddWhitelist(Address),
    RemoveWhitelist(Address),
    /// `(token, to, amount)`: moves a foreign token held by the contract.
    Recovery(Address, Address, i128),
    AddDistributionWallet(Address),
    RemoveDistributionWallet(Address),
}

impl Action {
    pub fn kind(&self) -> ProposalType {
        match self {
            Action::AddRole(..) => ProposalType::AddRole,
            Action::RemoveRole(..) => ProposalType::RemoveRole,
            Action::AddWhitelist(_) => ProposalType::AddWhitelist,
            Action::RemoveWhitelist(_) => ProposalType::RemoveWhitelist,
            Action::Recovery(..) => ProposalType::Recovery,
            Action::AddDistributionWallet(_) => ProposalType::AddDistributionWallet,
            Action::RemoveDistributionWallet(_) => ProposalType::RemoveDistributionWallet,
        }
    }

    /// The address the action is applied to.
    pub fn target(&self) -> Address {
        match self {
            Action::AddRole(_, account)
            | Action::RemoveRole(_, account)
            | Action::AddWhitelist(account)
            | Action::RemoveWhitelist(account)
            | Action::AddDistributionWallet(account)
            | Action::RemoveDistributionWallet(account) => account.clone(),
            Action::Recovery(_, to, _) => to.clone(),
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProposalStatus {
    Pending,
    Executed,
    Expired,
}

/// A recorded proposal. Records are never deleted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    pub id: u64,
    pub kind: ProposalType,
    pub action: Action,
    pub proposer: Address,
    /// Role whose holders count towards quorum.
    pub approver_role: RoleId,
    /// Role quorum when the proposal was created.
    pub quorum: u32,
    /// Distinct approvers in approval order; the proposer comes first.
    pub approvals: Vec<Address>,
    pub created_at: u64,
    /// First timestamp at which approvals are accepted.
    pub executable_at: u64,
    pub expires_at: u64,
    pub executed: bool,
    pub executed_at: Option<u64>,
}

impl Proposal {
    pub fn status(&self, now: u64) -> ProposalStatus {
        if self.executed {
            ProposalStatus::Executed
        } else if now >= self.expires_at {
            ProposalStatus::Expired
        } else {
            ProposalStatus::Pending
        }
    }

    pub fn has_approved(&self, account: &Address) -> bool {
        self.approvals.iter().any(|a| a == *account)
    }
}

/// Decides whether `proposal` executes now.
///
/// `approvals` is the number of distinct approvers currently holding the
/// approver role and `quorum` the quorum to meet. Returns the action to
/// apply, or `None` while the proposal is not yet (or no longer) eligible.
/// Has no side effects.
pub fn try_execute(proposal: &Proposal, approvals: u32, quorum: u32, now: u64) -> Option<Action> {
    if proposal.executed || now >= proposal.expires_at || now < proposal.executable_at {
        return None;
    }
    if quorum == 0 || approvals < quorum {
        return None;
    }
    Some(proposal.action.clone())
}
