//! Built-in textbook passages and vector seeding

use tracing::info;
use tracing::warn;
use uuid::Uuid;

use crate::embeddings::EmbeddingService;
use crate::models::ChunkPayload;
use crate::vector::VectorStore;
use crate::Result;

/// One passage of the textbook
#[derive(Debug, Clone, Copy)]
pub struct BookChunk {
    pub text: &'static str,
    pub module: &'static str,
    pub section: &'static str,
}

impl BookChunk {
    fn payload(&self) -> ChunkPayload {
        ChunkPayload {
            text: self.text.to_string(),
            module: self.module.to_string(),
            section: self.section.to_string(),
        }
    }
}

pub const BOOK_CHUNKS: [BookChunk; 6] = [
    BookChunk {
        text: "ROS 2 (Robot Operating System 2) is the middleware that enables communication between different components of a robot system. Think of it as the nervous system that allows the robot's brain (AI algorithms) to communicate with its body (sensors and actuators).",
        module: "module1",
        section: "introduction",
    },
    BookChunk {
        text: "ROS 2 follows a distributed architecture where different processes (nodes) communicate through topics, services, and actions. Nodes are individual processes that perform specific tasks. Topics are asynchronous communication channels for streaming data.",
        module: "module1",
        section: "architecture",
    },
    BookChunk {
        text: "Gazebo is a powerful physics simulation environment that allows you to test robot behaviors in realistic virtual environments. It simulates physics, gravity, collisions, and various sensors including LiDAR, cameras, and IMUs.",
        module: "module2",
        section: "gazebo",
    },
    BookChunk {
        text: "NVIDIA Isaac Sim is a photorealistic simulation environment built on NVIDIA Omniverse. It provides high-fidelity physics simulation, realistic rendering with ray tracing, synthetic data generation for training, and domain randomization for sim-to-real transfer.",
        module: "module3",
        section: "isaac-sim",
    },
    BookChunk {
        text: "Vision-Language-Action (VLA) represents the convergence of Large Language Models (LLMs) and Robotics. OpenAI Whisper converts spoken language into text, enabling voice commands for robot control. LLMs can translate high-level natural language commands into sequences of robot actions.",
        module: "module4",
        section: "vla",
    },
    BookChunk {
        text: "The capstone project involves building a simulated humanoid robot that receives voice commands, plans paths, navigates obstacles, identifies objects using computer vision, and manipulates objects to complete tasks.",
        module: "capstone",
        section: "overview",
    },
];

/// A passage written to the vector store
#[derive(Debug, Clone)]
pub struct SeededChunk {
    pub id: String,
    pub payload: ChunkPayload,
}

/// Embed and upsert each chunk under a fresh id
///
/// Chunks whose embedding comes back empty are skipped. The returned list
/// holds what was written, in input order.
///
/// # Errors
/// - Vector store write failures (the run stops at the first one)
pub async fn seed_vectors(
    embeddings: &EmbeddingService,
    store: &dyn VectorStore,
    chunks: &[BookChunk],
) -> Result<Vec<SeededChunk>> {
    info!("Starting vector seeding ({} chunks)", chunks.len());
    let mut written = Vec::with_capacity(chunks.len());

    for chunk in chunks {
        info!("Processing chunk from {}...", chunk.module);

        let embedding = embeddings.embed(chunk.text).await;
        if embedding.is_empty() {
            warn!("Failed to get embedding for chunk: {}", chunk.module);
            continue;
        }

        let id = Uuid::new_v4().to_string();
        let payload = chunk.payload();
        store.upsert(&id, embedding, &payload).await?;

        info!("Added vector for {}/{}", chunk.module, chunk.section);
        written.push(SeededChunk { id, payload });
    }

    info!("Vector seeding complete: {} written", written.len());
    Ok(written)
}
