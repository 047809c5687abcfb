/// Use cases module containing application business logic orchestration
mod consolidate_requirements;

pub use consolidate_requirements::ConsolidateRequirementsUseCase;
