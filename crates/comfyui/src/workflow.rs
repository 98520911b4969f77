//! Text-to-image workflow in ComfyUI's API prompt format.

use greenthreads_core::generation::ImageParams;
use serde_json::{json, Value};

/// Node id of the `SaveImage` node.
pub const SAVE_NODE: &str = "9";

pub const NEGATIVE_PROMPT: &str = "blurry, low quality, distorted, deformed, text, watermark";

const SAMPLER: &str = "euler";
const SCHEDULER: &str = "normal";
const FILENAME_PREFIX: &str = "greenthreads";

/// Build a single-image txt2img graph: checkpoint loader, positive and
/// negative CLIP encodes, empty latent, KSampler, VAE decode, save.
pub fn txt2img(prompt: &str, params: &ImageParams, checkpoint: &str, seed: u64) -> Value {
    json!({
        "3": {
            "class_type": "KSampler",
            "inputs": {
                "seed": seed,
                "steps": params.steps,
                "cfg": params.guidance_scale,
                "sampler_name": SAMPLER,
                "scheduler": SCHEDULER,
                "denoise": 1.0,
                "model": ["4", 0],
                "positive": ["6", 0],
                "negative": ["7", 0],
                "latent_image": ["5", 0]
            }
        },
        "4": {
            "class_type": "CheckpointLoaderSimple",
            "inputs": { "ckpt_name": checkpoint }
        },
        "5": {
            "class_type": "EmptyLatentImage",
            "inputs": {
                "width": params.width,
                "height": params.height,
                "batch_size": 1
            }
        },
        "6": {
            "class_type": "CLIPTextEncode",
            "inputs": { "text": prompt, "clip": ["4", 1] }
        },
        "7": {
            "class_type": "CLIPTextEncode",
            "inputs": { "text": NEGATIVE_PROMPT, "clip": ["4", 1] }
        },
        "8": {
            "class_type": "VAEDecode",
            "inputs": { "samples": ["3", 0], "vae": ["4", 2] }
        },
        "9": {
            "class_type": "SaveImage",
            "inputs": { "filename_prefix": FILENAME_PREFIX, "images": ["8", 0] }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_carries_params() {
        let params = ImageParams::default();
        let graph = txt2img("a hemp shirt", &params, "v1-5-pruned-emaonly.safetensors", 42);

        assert_eq!(graph["3"]["inputs"]["steps"], 20);
        assert_eq!(graph["3"]["inputs"]["cfg"], 7.0);
        assert_eq!(graph["3"]["inputs"]["seed"], 42);
        assert_eq!(graph["5"]["inputs"]["width"], 512);
        assert_eq!(graph["5"]["inputs"]["height"], 512);
        assert_eq!(graph["6"]["inputs"]["text"], "a hemp shirt");
        assert_eq!(graph["4"]["inputs"]["ckpt_name"], "v1-5-pruned-emaonly.safetensors");
        assert_eq!(graph[SAVE_NODE]["class_type"], "SaveImage");
    }

    #[test]
    fn every_link_targets_an_existing_node() {
        let graph = txt2img("x", &ImageParams::default(), "ckpt", 1);
        let nodes = graph.as_object().unwrap();
        for node in nodes.values() {
            for input in node["inputs"].as_object().unwrap().values() {
                if let Some(link) = input.as_array() {
                    let target = link[0].as_str().unwrap();
                    assert!(nodes.contains_key(target), "dangling link to {target}");
                }
            }
        }
    }
}
