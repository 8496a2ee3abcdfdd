pub mod skill_processor;
