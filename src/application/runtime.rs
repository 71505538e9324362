//! Bot runtime - connects an adapter to the dispatcher

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::application::errors::{BotError, LoadError};
use crate::application::messaging::{CommandDispatcher, DispatchOutcome, MessageParser};
use crate::application::services::AuthorizationGate;
use crate::domain::entities::{BotEvent, Content};
use crate::domain::traits::{Bot, ChatReply, Incoming, ReplySink};
use crate::extensions::bundled::DEFAULT_EXTENSION;
use crate::extensions::{ExtensionCatalog, ExtensionLoader};
use crate::infrastructure::config::SharedConfig;

/// Owns the adapter and the dispatcher (and through it the loader and registry)
pub struct BotRuntime<B: Bot> {
    bot: B,
    parser: MessageParser,
    dispatcher: CommandDispatcher,
    config: SharedConfig,
}

impl<B: Bot> BotRuntime<B> {
    pub fn new(bot: B, config: SharedConfig, catalog: ExtensionCatalog) -> Result<Self, BotError> {
        let prefix = config
            .read()
            .map_err(|_| BotError::Internal("Config lock poisoned".to_string()))?
            .command_prefix
            .clone();

        let gate = AuthorizationGate::new(Arc::clone(&config));
        let dispatcher = CommandDispatcher::new(ExtensionLoader::new(catalog), gate, prefix.as_str())
            .map_err(|e| BotError::Internal(e.to_string()))?;

        Ok(Self {
            bot,
            parser: MessageParser::new(prefix),
            dispatcher,
            config,
        })
    }

    pub fn bot(&self) -> &B {
        &self.bot
    }

    pub fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }

    /// Log connection diagnostics and notify connect hooks
    pub async fn on_connect(&self) {
        let info = self.bot.bot_info();
        let latency = self.bot.latency().await;

        info!("Logged in as {} (@{}, id {})", info.name, info.username, info.id);
        info!("Latency: {:.2}ms", latency.as_secs_f64() * 1000.0);

        self.dispatcher.emit(&BotEvent::Connected {
            user: info.username,
            latency,
        });
    }

    /// Load the default extension, then the configured ones, then notify ready hooks
    pub async fn on_ready(&mut self) -> Result<(), BotError> {
        info!("Bot ready!");

        let configured = self
            .config
            .read()
            .map_err(|_| BotError::Internal("Config lock poisoned".to_string()))?
            .extensions
            .clone();

        let mut ids = vec![DEFAULT_EXTENSION.to_string()];
        for id in configured {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        for id in &ids {
            match self.dispatcher.loader_mut().load(id).await {
                Ok(()) => info!("Extension {} loaded", id),
                Err(LoadError::AlreadyLoaded(_)) => debug!("Extension {} already loaded", id),
                Err(e) => warn!("Failed to load extension {}: {}", id, e),
            }
        }

        self.dispatcher.emit(&BotEvent::Ready);
        Ok(())
    }

    /// Parse and handle one inbound text
    pub async fn handle(&mut self, incoming: Incoming) -> Result<DispatchOutcome, BotError> {
        let message = self
            .parser
            .parse(incoming.chat_id, incoming.text, Some(incoming.sender));

        if !message.content.is_command() {
            if matches!(message.content, Content::Text(_)) {
                self.dispatcher.emit(&BotEvent::Message(message));
            }
            return Ok(DispatchOutcome::Ignored);
        }

        let reply = ChatReply::new(&self.bot, &message.chat_id);
        let outcome = self.dispatcher.dispatch(&message, &reply).await?;

        if let DispatchOutcome::Unknown(name) = &outcome {
            reply
                .send(&format!("Unknown command: {}{}", self.parser.prefix(), name))
                .await?;
        }
        Ok(outcome)
    }

    /// Start the adapter and serve until its input ends
    pub async fn run(&mut self) -> Result<(), BotError> {
        self.bot.start().await?;
        self.on_connect().await;
        self.on_ready().await?;

        while let Some(incoming) = self.bot.receive().await {
            self.handle(incoming).await?;
        }

        info!("Session ended");
        Ok(())
    }
}
