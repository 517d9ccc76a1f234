use crate::actors::messages::{ActorError, AppError, ChatMessage};
use crate::actors::traits::Responder;
use crate::assistant::{IntentClassifier, GREETING};
use crate::config::DeskConfig;
use crate::models::{ConversationLog, Message};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{sleep, timeout, Duration};
use tracing::{debug, info, instrument, warn};

/// How long a caller waits for the actor to acknowledge a request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Behaviour knobs for one conversation.
#[derive(Debug, Clone, Copy)]
pub struct ChatOptions {
    /// Simulated processing delay before each assistant reply lands in the log.
    pub reply_delay: Duration,
    /// Open the conversation with the assistant greeting.
    pub seed_greeting: bool,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            reply_delay: Duration::from_secs(1),
            seed_greeting: true,
        }
    }
}

impl From<&DeskConfig> for ChatOptions {
    fn from(config: &DeskConfig) -> Self {
        Self {
            reply_delay: config.reply_delay(),
            seed_greeting: config.seed_greeting,
        }
    }
}

/// A handle to the chat actor.
///
/// The actor task owns the conversation log; every append happens on that
/// task, so the log needs no lock.
#[derive(Clone)]
pub struct ChatHandle {
    sender: mpsc::Sender<ChatMessage>,
    reply_delay: Duration,
}

impl ChatHandle {
    /// Starts a conversation answered by the scripted classifier.
    pub fn new(config: &DeskConfig, classifier: IntentClassifier) -> Self {
        Self::spawn(Arc::new(classifier), ChatOptions::from(config), None)
    }

    /// Starts a conversation with an arbitrary responder.
    ///
    /// When `events` is set, every appended message is also sent there so a
    /// front-end can render it as it arrives.
    pub fn spawn<R: Responder>(
        responder: Arc<R>,
        options: ChatOptions,
        events: Option<mpsc::UnboundedSender<Message>>,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let runner = ChatRunner::new(receiver, sender.downgrade(), responder, options, events);
        tokio::spawn(async move { runner.run().await });
        Self {
            sender,
            reply_delay: options.reply_delay,
        }
    }

    /// Submits a citizen utterance.
    ///
    /// Blank input is rejected before the classifier ever sees it. On success
    /// the stored user message is returned; the assistant reply follows after
    /// the configured delay.
    #[instrument(skip(self))]
    pub async fn send(&self, text: String) -> Result<Message, AppError> {
        let (send, recv) = oneshot::channel();
        self.post(ChatMessage::Submit {
            text,
            responder: send,
        })
        .await?;
        timeout(REQUEST_TIMEOUT, recv)
            .await?
            .map_err(|_| ActorError::Dropped)?
    }

    /// Snapshot of the conversation in insertion order.
    #[instrument(skip(self))]
    pub async fn history(&self) -> Result<Vec<Message>, AppError> {
        let (send, recv) = oneshot::channel();
        self.post(ChatMessage::History { responder: send }).await?;
        Ok(timeout(REQUEST_TIMEOUT, recv)
            .await?
            .map_err(|_| ActorError::Dropped)?)
    }

    /// Number of assistant replies not yet appended to the log.
    #[instrument(skip(self))]
    pub async fn pending_replies(&self) -> Result<usize, AppError> {
        let (send, recv) = oneshot::channel();
        self.post(ChatMessage::PendingReplies { responder: send })
            .await?;
        Ok(timeout(REQUEST_TIMEOUT, recv)
            .await?
            .map_err(|_| ActorError::Dropped)?)
    }

    /// Waits until every reply scheduled so far has been appended.
    #[instrument(skip(self))]
    pub async fn settle(&self) -> Result<(), AppError> {
        let (send, recv) = oneshot::channel();
        self.post(ChatMessage::Settle { responder: send }).await?;
        Ok(timeout(self.reply_delay + REQUEST_TIMEOUT, recv)
            .await?
            .map_err(|_| ActorError::Dropped)?)
    }

    /// Closes the widget. Replies already scheduled are not cancelled; they
    /// find the actor gone and are discarded.
    #[instrument(skip(self))]
    pub async fn dismiss(&self) -> Result<(), AppError> {
        self.post(ChatMessage::Dismiss).await
    }

    /// Lets every scheduled reply land, then dismisses the widget.
    ///
    /// Once the actor stops it drops its event sender, so a listener draining
    /// the event stream sees the complete conversation and then the end.
    #[instrument(skip(self))]
    pub async fn close(self) -> Result<(), AppError> {
        self.settle().await?;
        self.dismiss().await
    }

    async fn post(&self, msg: ChatMessage) -> Result<(), AppError> {
        self.sender
            .send(msg)
            .await
            .map_err(|_| AppError::Actor(ActorError::Closed))
    }
}

// --- Actor Runner ---
struct ChatRunner<R: Responder> {
    receiver: mpsc::Receiver<ChatMessage>,
    // Weak so that dropping every handle still lets the loop end once the
    // in-flight timers have delivered.
    loopback: mpsc::WeakSender<ChatMessage>,
    responder: Arc<R>,
    options: ChatOptions,
    events: Option<mpsc::UnboundedSender<Message>>,
    log: ConversationLog,
    // Replies are numbered when scheduled and appended strictly in that
    // order; timers that fire out of order wait in `arrived`.
    next_seq: u64,
    next_append: u64,
    arrived: BTreeMap<u64, String>,
    settle_waiters: Vec<oneshot::Sender<()>>,
}

impl<R: Responder> ChatRunner<R> {
    fn new(
        receiver: mpsc::Receiver<ChatMessage>,
        loopback: mpsc::WeakSender<ChatMessage>,
        responder: Arc<R>,
        options: ChatOptions,
        events: Option<mpsc::UnboundedSender<Message>>,
    ) -> Self {
        let mut runner = Self {
            receiver,
            loopback,
            responder,
            options,
            events,
            log: ConversationLog::new(),
            next_seq: 0,
            next_append: 0,
            arrived: BTreeMap::new(),
            settle_waiters: Vec::new(),
        };
        if options.seed_greeting {
            runner.append(Message::assistant(GREETING));
        }
        runner
    }

    async fn run(mut self) {
        info!("Chat actor started");
        while let Some(msg) = self.receiver.recv().await {
            if !self.handle_message(msg) {
                break;
            }
        }
        if self.pending() > 0 {
            warn!(pending = self.pending(), "Chat actor stopped with replies in flight");
        }
        info!(messages = self.log.len(), "Chat actor stopped");
    }

    /// Returns `false` when the actor should stop.
    fn handle_message(&mut self, msg: ChatMessage) -> bool {
        match msg {
            ChatMessage::Submit { text, responder } => {
                let result = self.handle_submit(text);
                let _ = responder.send(result);
            }
            ChatMessage::DeliverReply { seq, text } => {
                self.arrived.insert(seq, text);
                self.flush_replies();
            }
            ChatMessage::History { responder } => {
                let _ = responder.send(self.log.messages());
            }
            ChatMessage::PendingReplies { responder } => {
                let _ = responder.send(self.pending());
            }
            ChatMessage::Settle { responder } => {
                if self.pending() == 0 {
                    let _ = responder.send(());
                } else {
                    self.settle_waiters.push(responder);
                }
            }
            ChatMessage::Dismiss => {
                info!("Chat widget dismissed");
                return false;
            }
        }
        true
    }

    fn handle_submit(&mut self, text: String) -> Result<Message, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "Message must not be empty".to_string(),
            ));
        }

        let stored = self.append(Message::user(text.clone()));
        self.schedule_reply(text);
        Ok(stored)
    }

    fn pending(&self) -> usize {
        usize::try_from(self.next_seq - self.next_append).unwrap_or(usize::MAX)
    }

    /// Appends every reply whose predecessors are all in the log.
    fn flush_replies(&mut self) {
        while let Some(text) = self.arrived.remove(&self.next_append) {
            self.next_append += 1;
            self.append(Message::assistant(text));
        }
        if self.pending() == 0 {
            for waiter in self.settle_waiters.drain(..) {
                let _ = waiter.send(());
            }
        }
    }

    fn append(&mut self, message: Message) -> Message {
        let stored = self.log.push(message).clone();
        if let Some(events) = &self.events {
            if events.send(stored.clone()).is_err() {
                debug!("Message listener gone; keeping message in log only");
            }
        }
        stored
    }

    fn schedule_reply(&mut self, utterance: String) {
        let Some(sender) = self.loopback.upgrade() else {
            debug!("No handle left to deliver a reply to");
            return;
        };
        let responder = Arc::clone(&self.responder);
        let delay = self.options.reply_delay;
        let seq = self.next_seq;
        self.next_seq += 1;

        tokio::spawn(async move {
            sleep(delay).await;
            let text = responder.respond(&utterance).await;
            if sender.send(ChatMessage::DeliverReply { seq, text }).await.is_err() {
                debug!("Reply discarded: chat widget was dismissed before it arrived");
            }
        });
    }
}
