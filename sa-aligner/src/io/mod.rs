pub mod alnfile;
pub mod seqfile;
